//! Command table
//!
//! Static mapping from lowercase command key to its canned response lines.
//! Keys are matched exactly; lookups never fall back to prefixes.

/// One canned command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEntry {
    /// Lowercase lookup key
    pub key: &'static str,
    /// Response lines, printed verbatim and in order
    pub response: &'static [&'static str],
}

const HELP: &[&str] = &[
    "Commands available:",
    "  help         – this menu",
    "  about        – who I am",
    "  contact      – how to reach me",
    "  education    – my degree & graduation",
    "  experience   – professional highlights",
    "  projects     – what I’ve built",
    "  skills       – my skillset",
    "  linkedin     – open my LinkedIn profile",
    "  retro        – toggle retro mode",
    "  destroy      – do not type this",
    "  clear        – clear screen",
];

const ABOUT: &[&str] = &[
    "Cooper Hoy",
    "Cybersecurity Engineering student.",
    "Iowa State University",
    "Based in Ames, Iowa",
    "love to hike, play frisbee, and read",
];

const CONTACT: &[&str] = &[
    "Phone: +1 319‑240‑3504",
    "Email: cooper.hoy3105@gmail.com",
    "LinkedIn: linkedin.com/in/cooperhoy",
];

const EDUCATION: &[&str] = &[
    "BA in Cybersecurity Engineering",
    "Iowa State University",
    "Expected Graduation: May 2027",
];

const EXPERIENCE: &[&str] = &[
    "IT Infrastructure Engineer",
    "IT Support Specialist",
    "Configured & deployed Windows Server 2025 in hypervisor",
    "Built AD‑clone testing sandbox for new products",
    "Developed hardening GPOs for security baseline",
];

const PROJECTS: &[&str] = &[
    "W@v3 Encryption Library (Python)",
    "HelpLLama AI Help‑desk Chat‑bot",
    "SentinelAI Proxy (Node.js)",
    "BetterMap Scanner (React, Three.js)",
];

const SKILLS: &[&str] = &[
    "Python • AD • Exchange • PowerShell",
    "Windows • Linux • VMware • ServiceNow",
    "Cryptography • Storage • Troubleshooting",
];

const RICKROLL: &[&str] = &[
    "♪ Never gonna give you up",
    "♪ Never gonna let you down",
    "♪ Never gonna run around and desert you",
];

const WHOAMI: &[&str] = &["You are a curious person exploring my 3D portfolio terminal!"];

const SUDO_RM: &[&str] = &[
    "Error: Permission denied.",
    "This portfolio is safe from wipes! 🌱",
];

const ENTRIES: &[CommandEntry] = &[
    CommandEntry { key: "help", response: HELP },
    CommandEntry { key: "about", response: ABOUT },
    CommandEntry { key: "contact", response: CONTACT },
    CommandEntry { key: "education", response: EDUCATION },
    CommandEntry { key: "experience", response: EXPERIENCE },
    CommandEntry { key: "projects", response: PROJECTS },
    CommandEntry { key: "skills", response: SKILLS },
    CommandEntry { key: "rickroll", response: RICKROLL },
    CommandEntry { key: "whoami", response: WHOAMI },
    CommandEntry { key: "sudo rm -rf /", response: SUDO_RM },
];

/// Static command table
#[derive(Debug, Clone, Copy)]
pub struct CommandTable {
    entries: &'static [CommandEntry],
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CommandTable {
    /// The built-in portfolio table
    pub const fn builtin() -> Self {
        Self { entries: ENTRIES }
    }

    /// Build a table over custom entries
    pub const fn from_entries(entries: &'static [CommandEntry]) -> Self {
        Self { entries }
    }

    /// Look up the response for an exact, already-lowercased key
    pub fn get(&self, key: &str) -> Option<&'static [&'static str]> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.response)
    }

    /// Check if a key is present
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in table order
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
