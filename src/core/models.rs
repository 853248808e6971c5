//! Output configuration shared by the writers.

/// Controls which optional columns the writers emit.
///
/// `Date`, `Sender` and `Message` are always written.
///
/// # Example
///
/// ```
/// use chatlens::core::models::OutputConfig;
///
/// let config = OutputConfig::new().with_time();
/// assert!(config.include_time);
/// assert!(!config.include_raw_date);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Include the raw time token
    pub include_time: bool,
    /// Include the raw date token as written in the export
    pub include_raw_date: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables every optional column.
    pub fn all() -> Self {
        Self {
            include_time: true,
            include_raw_date: true,
        }
    }

    #[must_use]
    pub fn with_time(mut self) -> Self {
        self.include_time = true;
        self
    }

    #[must_use]
    pub fn with_raw_date(mut self) -> Self {
        self.include_raw_date = true;
        self
    }
}
