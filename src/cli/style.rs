//! Terminal styling for command output
//!
//! Output is styled by meaning rather than by color: call [`Stylize::accent`]
//! on a branch name, [`Stylize::muted`] on a commit id. Whether escape codes
//! are emitted is decided per stream by `owo-colors`, so `NO_COLOR` and
//! redirected output render plain text.
//!
//! | Method        | Look   | Default stream | Used for                     |
//! |---------------|--------|----------------|------------------------------|
//! | `.accent()`   | cyan   | stdout         | branches, request numbers    |
//! | `.success()`  | green  | stdout         | "Merged", check marks        |
//! | `.error()`    | red    | stderr         | push failures, merge refusal |
//! | `.warn()`     | yellow | stderr         | stopped commits              |
//! | `.muted()`    | dim    | stdout         | commit ids, dry-run notes    |
//! | `.emphasis()` | bold   | stdout         | phase names, titles          |

use std::fmt::{self, Display};
use std::sync::OnceLock;

use indicatif::ProgressStyle;
pub use owo_colors::Stream;
use owo_colors::{OwoColorize, Style};

const ACCENT: Style = Style::new().cyan();
const SUCCESS: Style = Style::new().green();
const ERROR: Style = Style::new().red();
const WARN: Style = Style::new().yellow();
const MUTED: Style = Style::new().dimmed();
const EMPHASIS: Style = Style::new().bold();

/// A value paired with the style and stream it renders for
#[derive(Clone, Debug)]
pub struct Styled<T> {
    value: T,
    style: Style,
    stream: Stream,
}

impl<T> Styled<T> {
    const fn new(value: T, style: Style, stream: Stream) -> Self {
        Self {
            value,
            style,
            stream,
        }
    }

    /// Decide coloring by stderr, for values printed with `eprintln!`
    #[must_use]
    pub const fn for_stderr(mut self) -> Self {
        self.stream = Stream::Stderr;
        self
    }

    /// Decide coloring by stdout, for stderr-default styles printed with `println!`
    #[must_use]
    pub const fn for_stdout(mut self) -> Self {
        self.stream = Stream::Stdout;
        self
    }
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.value
                .if_supports_color(self.stream, |v| v.style(self.style))
        )
    }
}

/// Semantic styles for anything printable
pub trait Stylize: Display {
    /// Branch names, request numbers, remotes
    fn accent(&self) -> Styled<&Self> {
        Styled::new(self, ACCENT, Stream::Stdout)
    }

    /// Completed actions
    fn success(&self) -> Styled<&Self> {
        Styled::new(self, SUCCESS, Stream::Stdout)
    }

    /// Failures; rendered for stderr
    fn error(&self) -> Styled<&Self> {
        Styled::new(self, ERROR, Stream::Stderr)
    }

    /// Commits that will not be pushed; rendered for stderr
    fn warn(&self) -> Styled<&Self> {
        Styled::new(self, WARN, Stream::Stderr)
    }

    /// Commit ids, git output, dry-run notes
    fn muted(&self) -> Styled<&Self> {
        Styled::new(self, MUTED, Stream::Stdout)
    }

    /// Phase names and request titles
    fn emphasis(&self) -> Styled<&Self> {
        Styled::new(self, EMPHASIS, Stream::Stdout)
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Check mark
pub const CHECK: &str = "✓";
/// Cross
pub const CROSS: &str = "✗";
/// Commit list marker
pub const BULLET: &str = "○";

/// Green check mark
pub const fn check() -> Styled<&'static str> {
    Styled::new(CHECK, SUCCESS, Stream::Stdout)
}

/// Red cross, rendered for stderr
pub const fn cross() -> Styled<&'static str> {
    Styled::new(CROSS, ERROR, Stream::Stderr)
}

/// Dim commit list marker
pub const fn bullet() -> Styled<&'static str> {
    Styled::new(BULLET, MUTED, Stream::Stdout)
}

/// `text` with every non-blank line prefixed by `indent`
///
/// Blank lines are dropped so multi-line git output stays one compact block.
pub fn indent_block(text: &str, indent: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("{indent}{}", line.trim_end()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `url` as an OSC 8 link where the terminal supports it, plain otherwise
pub fn hyperlink_url(stream: Stream, url: &str) -> String {
    let stream = match stream {
        Stream::Stdout => supports_hyperlinks::Stream::Stdout,
        Stream::Stderr => supports_hyperlinks::Stream::Stderr,
    };
    if supports_hyperlinks::on(stream) {
        terminal_link::Link::new(url, url).to_string()
    } else {
        url.to_string()
    }
}

/// Spinner shown while connecting to the hosting service
pub fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("hardcoded spinner template is valid")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        })
        .clone()
}
