//! Best-effort clipboard: pipe text into the platform's clipboard command.

use anyhow::{bail, Context, Result};
use std::io::Write;
use std::process::{Command, Stdio};

pub trait ClipboardSink {
    fn copy(&self, text: &str) -> Result<()>;
}

/// Shells out to `pbcopy`, `xclip` or `clip`, or a configured command.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    argv: Vec<String>,
}

impl SystemClipboard {
    pub fn for_platform() -> Self {
        let argv: &[&str] = match std::env::consts::OS {
            "macos" => &["pbcopy"],
            "windows" => &["clip"],
            _ => &["xclip", "-selection", "clipboard"],
        };
        Self::with_command(argv.iter().map(|s| s.to_string()).collect())
    }

    pub fn with_command(argv: Vec<String>) -> Self {
        Self { argv }
    }
}

impl ClipboardSink for SystemClipboard {
    fn copy(&self, text: &str) -> Result<()> {
        let (bin, args) = self.argv.split_first().context("empty clipboard command")?;

        let mut child = Command::new(bin)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("running {}", bin))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .with_context(|| format!("writing to {}", bin))?;
        }

        let status = child.wait().with_context(|| format!("waiting for {}", bin))?;
        if !status.success() {
            bail!("{} failed with status: {}", bin, status);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_is_an_error() {
        let sink = SystemClipboard::with_command(vec!["reconcile-no-such-clipboard-bin".into()]);
        assert!(sink.copy("Statement period: 03/01 to 03/28").is_err());
    }

    #[test]
    fn test_empty_command_is_an_error() {
        assert!(SystemClipboard::with_command(vec![]).copy("x").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_command_receives_text() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("clip.txt");
        let sink = SystemClipboard::with_command(vec![
            "sh".into(),
            "-c".into(),
            format!("cat > '{}'", out.display()),
        ]);
        sink.copy("Statement period: 03/01 to 03/28").unwrap();
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "Statement period: 03/01 to 03/28"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_command_is_an_error() {
        let sink = SystemClipboard::with_command(vec!["sh".into(), "-c".into(), "exit 3".into()]);
        assert!(sink.copy("x").is_err());
    }
}
