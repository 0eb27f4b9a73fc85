#![cfg(unix)]

#[cfg(test)]
mod tests {
    use pirscreen::libs::gpio::{ControlLine, GpioError, MotionSource};
    use pirscreen::libs::signal::MotionSignal;
    use pirscreen::libs::sysfs_gpio::{SysfsControlLine, SysfsMotionSource, SysfsPin};
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// A fake `/sys/class/gpio` tree with pins 4 and 25 already exported.
    struct SysfsTestContext {
        root: TempDir,
    }

    impl TestContext for SysfsTestContext {
        fn setup() -> Self {
            let root = tempfile::tempdir().unwrap();
            for pin in [4, 25] {
                let dir = root.path().join(format!("gpio{}", pin));
                fs::create_dir(&dir).unwrap();
                fs::write(dir.join("direction"), "in").unwrap();
                fs::write(dir.join("edge"), "none").unwrap();
                fs::write(dir.join("value"), "0").unwrap();
            }
            SysfsTestContext { root }
        }
    }

    impl SysfsTestContext {
        fn path(&self) -> &Path {
            self.root.path()
        }

        fn attr(&self, pin: u32, name: &str) -> String {
            fs::read_to_string(self.pin_dir(pin).join(name)).unwrap()
        }

        fn pin_dir(&self, pin: u32) -> PathBuf {
            self.path().join(format!("gpio{}", pin))
        }

        fn unexported(&self) -> Option<String> {
            fs::read_to_string(self.path().join("unexport")).ok()
        }
    }

    #[test_context(SysfsTestContext)]
    #[test]
    fn test_control_line_rests_as_input_and_presses_low(ctx: &mut SysfsTestContext) {
        let mut line = SysfsControlLine::open_at(ctx.path(), 25).unwrap();
        assert_eq!(ctx.attr(25, "direction"), "in");
        assert!(!ctx.path().join("export").exists(), "an exported pin is not exported again");

        line.drive_low().unwrap();
        assert_eq!(ctx.attr(25, "direction"), "low");

        line.release().unwrap();
        assert_eq!(ctx.attr(25, "direction"), "in");
    }

    #[test_context(SysfsTestContext)]
    #[test]
    fn test_dropping_a_pin_unexports_it(ctx: &mut SysfsTestContext) {
        let line = SysfsControlLine::open_at(ctx.path(), 25).unwrap();
        assert!(ctx.unexported().is_none());

        drop(line);

        assert_eq!(ctx.unexported().as_deref(), Some("25"));
    }

    #[test_context(SysfsTestContext)]
    #[test]
    fn test_unexport_is_idempotent(ctx: &mut SysfsTestContext) {
        let mut pin = SysfsPin::export_at(ctx.path(), 4).unwrap();

        pin.unexport().unwrap();
        fs::remove_file(ctx.path().join("unexport")).unwrap();
        pin.unexport().unwrap();
        drop(pin);

        assert!(ctx.unexported().is_none(), "only the first unexport touches sysfs");
    }

    #[test_context(SysfsTestContext)]
    #[test]
    fn test_unknown_pin_is_exported_then_fails(ctx: &mut SysfsTestContext) {
        let result = SysfsControlLine::open_at(ctx.path(), 7);

        assert!(matches!(result, Err(GpioError::Direction { pin: 7, .. })));
        assert_eq!(fs::read_to_string(ctx.path().join("export")).unwrap(), "7");
        assert_eq!(ctx.unexported().as_deref(), Some("7"), "a half-opened pin is still released");
    }

    #[test_context(SysfsTestContext)]
    #[test]
    fn test_missing_sysfs_root_is_export_failure(ctx: &mut SysfsTestContext) {
        let root = ctx.path().join("no-gpio");

        assert!(matches!(SysfsPin::export_at(&root, 4), Err(GpioError::Export { pin: 4, .. })));
    }

    #[test_context(SysfsTestContext)]
    #[test]
    fn test_motion_source_arms_and_disarms_rising_edge(ctx: &mut SysfsTestContext) {
        let mut source = SysfsMotionSource::open_at(ctx.path(), 4).unwrap();
        assert_eq!(ctx.attr(4, "direction"), "in");

        source.start(Arc::new(MotionSignal::new())).unwrap();
        assert_eq!(ctx.attr(4, "edge"), "rising");

        source.stop().unwrap();
        assert_eq!(ctx.attr(4, "edge"), "none");
        assert_eq!(ctx.unexported().as_deref(), Some("4"));

        source.stop().unwrap();
    }

    #[test_context(SysfsTestContext)]
    #[test]
    fn test_motion_source_without_value_fails_to_start(ctx: &mut SysfsTestContext) {
        fs::remove_file(ctx.pin_dir(4).join("value")).unwrap();
        let mut source = SysfsMotionSource::open_at(ctx.path(), 4).unwrap();

        let result = source.start(Arc::new(MotionSignal::new()));

        assert!(matches!(result, Err(GpioError::Value { pin: 4, .. })));
    }
}
