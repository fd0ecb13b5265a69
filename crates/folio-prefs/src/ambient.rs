//! Ambient (platform-level) light/dark signal.

use crate::theme::Theme;

/// Environment variable overriding platform detection: `light` or `dark`.
pub const COLOR_SCHEME_ENV: &str = "FOLIO_COLOR_SCHEME";

/// Source of the platform's preferred theme.
pub trait AmbientSignal: Send + Sync {
    /// Preferred theme, or `None` when the platform expresses no preference.
    fn preferred_theme(&self) -> Option<Theme>;
}

/// Signal with a fixed answer.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedSignal(Option<Theme>);

impl FixedSignal {
    /// Create a signal that always reports `theme`.
    #[must_use]
    pub fn new(theme: Option<Theme>) -> Self {
        Self(theme)
    }
}

impl AmbientSignal for FixedSignal {
    fn preferred_theme(&self) -> Option<Theme> {
        self.0
    }
}

/// Signal read from the environment and the desktop settings.
///
/// `FOLIO_COLOR_SCHEME` wins when set. Otherwise the platform is queried:
/// GNOME settings on Linux, `AppleInterfaceStyle` on macOS and the
/// `AppsUseLightTheme` registry value on Windows.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemSignal;

impl SystemSignal {
    /// Create a system signal.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl AmbientSignal for SystemSignal {
    fn preferred_theme(&self) -> Option<Theme> {
        if let Ok(value) = std::env::var(COLOR_SCHEME_ENV) {
            match parse_scheme(&value) {
                Some(theme) => return Some(theme),
                None => tracing::warn!(value = %value, "Ignoring invalid {COLOR_SCHEME_ENV}"),
            }
        }
        let theme = query_platform();
        tracing::debug!(theme = ?theme, "Queried platform color scheme");
        theme
    }
}

/// Parse a color scheme name (`light`, `dark`, case-insensitive).
fn parse_scheme(value: &str) -> Option<Theme> {
    match value.trim().to_ascii_lowercase().as_str() {
        "light" => Some(Theme::Light),
        "dark" => Some(Theme::Dark),
        _ => None,
    }
}

/// Outcome of running a platform settings tool.
#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows", test))]
#[derive(Debug, PartialEq, Eq)]
enum ToolOutput {
    /// The command succeeded with this stdout.
    Stdout(String),
    /// The command ran and exited unsuccessfully.
    Failed,
    /// The command could not be started.
    Unavailable,
}

/// Run a platform settings tool.
#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
fn run_tool(program: &str, args: &[&str]) -> ToolOutput {
    match std::process::Command::new(program).args(args).output() {
        Ok(output) if output.status.success() => {
            ToolOutput::Stdout(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Ok(_) => ToolOutput::Failed,
        Err(e) => {
            tracing::debug!(program, error = %e, "Color scheme tool unavailable");
            ToolOutput::Unavailable
        }
    }
}

/// Run a settings tool and capture stdout when it succeeds.
#[cfg(any(target_os = "linux", target_os = "windows"))]
fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    match run_tool(program, args) {
        ToolOutput::Stdout(stdout) => Some(stdout),
        ToolOutput::Failed | ToolOutput::Unavailable => None,
    }
}

/// Interpret `gsettings get org.gnome.desktop.interface color-scheme`.
#[cfg(any(target_os = "linux", test))]
fn gnome_color_scheme(output: &str) -> Option<Theme> {
    if output.contains("prefer-dark") {
        Some(Theme::Dark)
    } else if output.contains("prefer-light") {
        Some(Theme::Light)
    } else {
        None
    }
}

/// Interpret `reg query ... /v AppsUseLightTheme`.
#[cfg(any(target_os = "windows", test))]
fn registry_light_theme(output: &str) -> Option<Theme> {
    let value = output
        .lines()
        .find(|line| line.contains("AppsUseLightTheme"))?
        .split_whitespace()
        .last()?;
    match value {
        "0x0" => Some(Theme::Dark),
        "0x1" => Some(Theme::Light),
        _ => None,
    }
}

#[cfg(target_os = "linux")]
fn query_platform() -> Option<Theme> {
    let scheme = command_stdout("gsettings", &["get", "org.gnome.desktop.interface", "color-scheme"]);
    if let Some(theme) = scheme.as_deref().and_then(gnome_color_scheme) {
        return Some(theme);
    }
    // Older desktops only expose the GTK theme name
    command_stdout("gsettings", &["get", "org.gnome.desktop.interface", "gtk-theme"])
        .filter(|name| name.to_lowercase().contains("dark"))
        .map(|_| Theme::Dark)
}

/// Interpret `defaults read -g AppleInterfaceStyle`.
///
/// The key only exists in dark mode, so a failed read means light. A
/// `defaults` that cannot run says nothing.
#[cfg(any(target_os = "macos", test))]
fn apple_interface_style(output: &ToolOutput) -> Option<Theme> {
    match output {
        ToolOutput::Stdout(style) if style.to_lowercase().contains("dark") => Some(Theme::Dark),
        ToolOutput::Stdout(_) | ToolOutput::Unavailable => None,
        ToolOutput::Failed => Some(Theme::Light),
    }
}

#[cfg(target_os = "macos")]
fn query_platform() -> Option<Theme> {
    apple_interface_style(&run_tool("defaults", &["read", "-g", "AppleInterfaceStyle"]))
}

#[cfg(target_os = "windows")]
fn query_platform() -> Option<Theme> {
    command_stdout(
        "reg",
        &[
            "query",
            r"HKCU\Software\Microsoft\Windows\CurrentVersion\Themes\Personalize",
            "/v",
            "AppsUseLightTheme",
        ],
    )
    .as_deref()
    .and_then(registry_light_theme)
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn query_platform() -> Option<Theme> {
    None
}
