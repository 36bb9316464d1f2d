//! Checker configuration.

use tern_diagnostic::ColorMode;

/// Knobs for one `check_module` run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CheckConfig {
    /// Unification steps allowed per top-level constraint.
    pub max_unify_steps: u32,
    /// Errors after which checking stops (0 = unlimited).
    pub error_limit: usize,
    pub color: ColorMode,
    /// Whether diagnostics go to a terminal; decides `ColorMode::Auto`.
    pub is_tty: bool,
    /// Source file name, for logs.
    pub file_name: String,
}

impl Default for CheckConfig {
    fn default() -> Self {
        CheckConfig {
            max_unify_steps: 10_000,
            error_limit: 0,
            color: ColorMode::Auto,
            is_tty: false,
            file_name: String::from("<input>"),
        }
    }
}

impl CheckConfig {
    /// Whether types in messages get ANSI colors.
    pub fn use_color(&self) -> bool {
        self.color.should_use_colors(self.is_tty)
    }

    pub fn limit_reached(&self, error_count: usize) -> bool {
        self.error_limit > 0 && error_count >= self.error_limit
    }
}
