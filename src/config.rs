//! Application configuration
//!
//! Nothing is persisted and no environment is read; every run starts from
//! the defaults below.

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dark_mode: bool,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Below this window width the sidebar collapses behind the menu button
    pub narrow_breakpoint: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dark_mode: true,
            window_size: [1250.0, 700.0],
            min_window_size: [720.0, 480.0],
            narrow_breakpoint: 900.0,
        }
    }
}
