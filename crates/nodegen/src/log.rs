// crates/nodegen/src/log.rs

/// Trait for structs that provide metadata for logging
pub trait LogMetadata {
    fn meta(&self) -> String;
}

/// Identifies the artifact an emitter is working on.
pub struct ArtifactContext<'a> {
    pub data_block: &'a str,
    pub artifact: &'a str,
}

impl LogMetadata for ArtifactContext<'_> {
    fn meta(&self) -> String {
        format!("data_block={}, artifact={}", self.data_block, self.artifact)
    }
}

// =============================================
// Logging Macros (namespaced under crate::log)
// =============================================

// ===== gen_info! =====
macro_rules! gen_info {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::log::LogMetadata::meta(&$ctx);
        ::log::info!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
}

// ===== gen_warn! =====
macro_rules! gen_warn {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::log::LogMetadata::meta(&$ctx);
        ::log::warn!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
}

// ===== gen_error! =====
macro_rules! gen_error {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::log::LogMetadata::meta(&$ctx);
        ::log::error!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
}

// ===== gen_debug! =====
macro_rules! gen_debug {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::log::LogMetadata::meta(&$ctx);
        ::log::debug!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
}

// Re-export macros for use in other files
pub(crate) use gen_debug;
pub(crate) use gen_error;
pub(crate) use gen_info;
pub(crate) use gen_warn;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_context_meta() {
        let ctx = ArtifactContext {
            data_block: "MainApp",
            artifact: "comm_l2_can1",
        };
        assert_eq!(ctx.meta(), "data_block=MainApp, artifact=comm_l2_can1");
    }
}
