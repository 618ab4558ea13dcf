//! Commit records and chain trailers

use regex::Regex;
use std::sync::OnceLock;

/// Number of hex digits shown for abbreviated commit IDs
const SHORT_ID_LEN: usize = 7;

fn trailer_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^(?:git-pr-chain|GPC):[ \t]*(.*)$").expect("hardcoded regex is valid")
    })
}

fn stop_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:git-pr-chain|GPC):\s*STOP\b").expect("hardcoded regex is valid")
    })
}

fn trailer_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(?:git-pr-chain|GPC):").expect("hardcoded regex is valid"))
}

/// One commit of the chain
///
/// Records live in a `Vec` in chain order (oldest first); `parent` is the
/// index of the previous record. Trailers are parsed once on construction,
/// `stop` and `branch` are filled in once by branch resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Full commit ID (hex)
    pub id: String,
    /// Index of the previous record in the chain
    pub parent: Option<usize>,
    /// Full commit message
    pub message: String,
    /// Whether the commit has more than one parent
    pub is_merge: bool,
    /// Whether this commit or an ancestor carries a STOP marker
    pub stop: bool,
    /// Branch this commit belongs to, after resolution
    pub branch: Option<String>,
    declared: Vec<String>,
    stop_marker: bool,
}

impl CommitRecord {
    /// Build a record, parsing chain trailers from `message`
    pub fn new(id: &str, parent: Option<usize>, message: &str, parent_count: usize) -> Self {
        let stop_marker = stop_re().is_match(message);
        let declared = trailer_re()
            .captures_iter(message)
            .filter(|caps| !stop_re().is_match(&caps[0]))
            .map(|caps| caps[1].trim().to_string())
            .filter(|branch| !branch.is_empty())
            .collect();

        Self {
            id: id.to_string(),
            parent,
            message: message.to_string(),
            is_merge: parent_count > 1,
            stop: false,
            branch: None,
            declared,
            stop_marker,
        }
    }

    /// Branch named by this commit's own trailer
    pub fn declared_branch(&self) -> Option<&str> {
        self.declared.first().map(String::as_str)
    }

    /// Whether the message carries more than one branch trailer
    pub fn has_duplicate_trailers(&self) -> bool {
        self.declared.len() > 1
    }

    /// Whether the message itself carries a STOP marker
    pub const fn has_stop_marker(&self) -> bool {
        self.stop_marker
    }

    /// Abbreviated commit ID
    pub fn short_id(&self) -> &str {
        &self.id[..SHORT_ID_LEN.min(self.id.len())]
    }

    /// First line of the message
    pub fn headline(&self) -> &str {
        self.message.lines().next().unwrap_or_default().trim()
    }

    /// `<short id> <headline>`, used in listings and error reports
    pub fn short_desc(&self) -> String {
        format!("{} {}", self.short_id(), self.headline())
    }

    /// The message with every chain trailer line removed
    pub fn message_without_trailers(&self) -> String {
        self.message
            .lines()
            .filter(|line| !trailer_line_re().is_match(line))
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}
