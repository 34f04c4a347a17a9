use crate::error::Result;
use std::io::ErrorKind;
use std::path::Path;
use std::time::SystemTime;

/// True when `output` exists and was modified no earlier than `input`
///
/// A missing `input` counts as stale so the step runs and the tool reports
/// the problem itself.
pub fn is_fresh(output: &Path, input: &Path) -> Result<bool> {
    let Some(output_time) = modified(output)? else {
        return Ok(false);
    };
    let Some(input_time) = modified(input)? else {
        return Ok(false);
    };
    Ok(output_time >= input_time)
}

fn modified(path: &Path) -> Result<Option<SystemTime>> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(Some(meta.modified()?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use latexlab_testkit::{temp_dir_in_workspace, touch_all};
    use std::time::Duration;

    fn set_mtime(path: &Path, time: SystemTime) {
        std::fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(time)
            .unwrap();
    }

    #[test]
    fn test_missing_output_is_stale() {
        let temp = temp_dir_in_workspace();
        touch_all(temp.path(), &["a.tex"]);
        assert!(!is_fresh(&temp.path().join("a.pdf"), &temp.path().join("a.tex")).unwrap());
    }

    #[test]
    fn test_newer_output_is_fresh() {
        let temp = temp_dir_in_workspace();
        touch_all(temp.path(), &["a.tex", "a.pdf"]);
        let now = SystemTime::now();
        set_mtime(&temp.path().join("a.tex"), now - Duration::from_secs(60));
        set_mtime(&temp.path().join("a.pdf"), now);

        assert!(is_fresh(&temp.path().join("a.pdf"), &temp.path().join("a.tex")).unwrap());
    }

    #[test]
    fn test_older_output_is_stale() {
        let temp = temp_dir_in_workspace();
        touch_all(temp.path(), &["a.tex", "a.pdf"]);
        let now = SystemTime::now();
        set_mtime(&temp.path().join("a.pdf"), now - Duration::from_secs(60));
        set_mtime(&temp.path().join("a.tex"), now);

        assert!(!is_fresh(&temp.path().join("a.pdf"), &temp.path().join("a.tex")).unwrap());
    }

    #[test]
    fn test_equal_times_are_fresh() {
        let temp = temp_dir_in_workspace();
        touch_all(temp.path(), &["a.tex", "a.pdf"]);
        let then = SystemTime::now() - Duration::from_secs(10);
        set_mtime(&temp.path().join("a.pdf"), then);
        set_mtime(&temp.path().join("a.tex"), then);

        assert!(is_fresh(&temp.path().join("a.pdf"), &temp.path().join("a.tex")).unwrap());
    }
}
