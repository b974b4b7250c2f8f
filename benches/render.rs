//! Rasterizer benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use portfolio_term::commands::Interpreter;
use portfolio_term::core::{ModeState, OutputBuffer, TerminalState};
use portfolio_term::renderer::{wrap_lines, Rasterizer};

fn ready_state(commands: &[&str]) -> TerminalState {
    let interpreter = Interpreter::default();
    let mut state = TerminalState::default();
    state.modes.finish_boot();
    for command in commands {
        interpreter.dispatch(command, &mut state);
    }
    state
}

fn bench_render_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let rasterizer = Rasterizer::default();

    let state = ready_state(&["help"]);
    group.throughput(Throughput::Elements(state.buffer.len() as u64));
    group.bench_function("help_screen", |b| {
        b.iter(|| black_box(rasterizer.render(&state.buffer, &state.modes)))
    });

    // Long lines force wrapping and windowing
    let long: Vec<String> = (0..100)
        .map(|i| format!("Line {}: {}", i, "some text content here ".repeat(4)))
        .collect();
    let buffer = OutputBuffer::from_lines(long);
    let mut modes = ModeState::default();
    modes.finish_boot();
    group.bench_function("wrapped_overflow", |b| {
        b.iter(|| black_box(rasterizer.render(&buffer, &modes)))
    });

    group.finish();
}

fn bench_render_destroyed(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let rasterizer = Rasterizer::default();
    let state = ready_state(&["destroy"]);

    group.bench_function("destroyed", |b| {
        b.iter(|| black_box(rasterizer.render(&state.buffer, &state.modes)))
    });

    group.finish();
}

fn bench_wrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let lines: Vec<String> = (0..1000).map(|i| "x".repeat(i % 200)).collect();

    group.bench_function("wrap_lines", |b| {
        b.iter(|| black_box(wrap_lines(black_box(lines.as_slice()), 45).len()))
    });

    group.finish();
}

criterion_group!(benches, bench_render_text, bench_render_destroyed, bench_wrap);

criterion_main!(benches);
