//! Chart dependency downloads

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;

use crate::binary::HelmBinary;
use crate::error::Result;

/// Fetches the dependencies declared by the chart at `chart_root` into its
/// `charts/` directory, reporting progress to `progress`.
pub trait DependencyManager {
    fn update(&self, chart_root: &Path, progress: &mut dyn Write) -> Result<()>;
}

impl<T: DependencyManager + ?Sized> DependencyManager for &T {
    fn update(&self, chart_root: &Path, progress: &mut dyn Write) -> Result<()> {
        (**self).update(chart_root, progress)
    }
}

impl<T: DependencyManager + ?Sized> DependencyManager for Box<T> {
    fn update(&self, chart_root: &Path, progress: &mut dyn Write) -> Result<()> {
        (**self).update(chart_root, progress)
    }
}

/// `helm dependency update`.
///
/// Helm's progress text is buffered and only written out once the update
/// succeeded; a failed update leaves `progress` untouched.
impl DependencyManager for HelmBinary {
    fn update(&self, chart_root: &Path, progress: &mut dyn Write) -> Result<()> {
        let mut args: Vec<OsString> = vec![
            "dependency".into(),
            "update".into(),
            chart_root.as_os_str().to_owned(),
        ];
        if self.skips_refresh() {
            args.push("--skip-refresh".into());
        }

        let stdout = self.execute(&args)?;

        if self.forwards_output() && !stdout.is_empty() {
            progress.write_all(&stdout)?;
        }
        Ok(())
    }
}
