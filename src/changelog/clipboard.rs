//! Copy-permalink control.
//!
//! The primary clipboard is tried first; when it fails, the fallback takes
//! over. Either way the caller gets the same confirmation to display.

use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, warn};
use tokio::io::{AsyncWriteExt, stdout};
use tokio::process::Command;

/// How long the "copied" state stays visible before reverting.
pub const CONFIRMATION_DURATION: Duration = Duration::from_secs(2);

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<()>;
    async fn read_text(&self) -> Result<String>;
}

/// What the copy button shows after a successful copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFeedback {
    pub icon: &'static str,
    pub class: &'static str,
    pub revert_after: Duration,
}

impl CopyFeedback {
    fn copied() -> Self {
        Self {
            icon: "fa-check",
            class: "copied",
            revert_after: CONFIRMATION_DURATION,
        }
    }
}

/// Writes `link` to `primary`, or to `fallback` if that fails.
#[tracing::instrument(skip(primary, fallback))]
pub async fn copy_permalink(
    primary: &dyn Clipboard,
    fallback: &dyn Clipboard,
    link: &str,
) -> Result<CopyFeedback> {
    match primary.write_text(link).await {
        Ok(()) => debug!("Copied {} to clipboard", link),
        Err(e) => {
            warn!("Clipboard unavailable ({}), using fallback", e);
            fallback
                .write_text(link)
                .await
                .context("Failed to copy link with fallback")?;
        }
    }
    Ok(CopyFeedback::copied())
}

#[cfg(target_os = "macos")]
const COPY_COMMANDS: &[(&str, &[&str])] = &[("pbcopy", &[])];
#[cfg(target_os = "macos")]
const PASTE_COMMANDS: &[(&str, &[&str])] = &[("pbpaste", &[])];

#[cfg(windows)]
const COPY_COMMANDS: &[(&str, &[&str])] = &[("clip", &[])];
#[cfg(windows)]
const PASTE_COMMANDS: &[(&str, &[&str])] =
    &[("powershell", &["-NoProfile", "-Command", "Get-Clipboard"])];

#[cfg(not(any(target_os = "macos", windows)))]
const COPY_COMMANDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
];
#[cfg(not(any(target_os = "macos", windows)))]
const PASTE_COMMANDS: &[(&str, &[&str])] = &[
    ("wl-paste", &["--no-newline"]),
    ("xclip", &["-selection", "clipboard", "-o"]),
];

/// The operating system clipboard, driven through its command-line tools.
pub struct SystemClipboard;

impl SystemClipboard {
    async fn pipe_into(program: &str, args: &[&str], text: &str) -> Result<()> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to start {}", program))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
        }

        let status = child.wait().await?;
        if !status.success() {
            anyhow::bail!("{} exited with {}", program, status);
        }
        Ok(())
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        let mut last_error = None;
        for (program, args) in COPY_COMMANDS {
            match Self::pipe_into(program, args, text).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    debug!("{} failed: {}", program, e);
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("No clipboard command available")))
    }

    async fn read_text(&self) -> Result<String> {
        for (program, args) in PASTE_COMMANDS {
            if let Ok(output) = Command::new(program).args(*args).output().await
                && output.status.success()
            {
                return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
            }
        }
        anyhow::bail!("No clipboard command available")
    }
}

/// Fallback that prints the link so it can be copied by hand.
pub struct StdoutClipboard;

#[async_trait]
impl Clipboard for StdoutClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        let mut out = stdout();
        out.write_all(format!("{}\n", text).as_bytes()).await?;
        out.flush().await?;
        Ok(())
    }

    async fn read_text(&self) -> Result<String> {
        anyhow::bail!("Standard output cannot be read back")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryClipboard(Mutex<String>);

    #[async_trait]
    impl Clipboard for MemoryClipboard {
        async fn write_text(&self, text: &str) -> Result<()> {
            *self.0.lock().unwrap() = text.to_string();
            Ok(())
        }

        async fn read_text(&self) -> Result<String> {
            Ok(self.0.lock().unwrap().clone())
        }
    }

    const LINK: &str = "https://example.com/whatsnew.html#v2.0%20final";

    #[tokio::test]
    async fn test_copy_round_trip() {
        let clipboard = MemoryClipboard::default();
        let fallback = MockClipboard::new();

        let feedback = copy_permalink(&clipboard, &fallback, LINK).await.unwrap();

        assert_eq!(clipboard.read_text().await.unwrap(), LINK);
        assert_eq!(feedback.class, "copied");
        assert_eq!(feedback.revert_after, Duration::from_secs(2));
    }

    #[test_log::test(tokio::test)]
    async fn test_fallback_gives_same_feedback() {
        let mut primary = MockClipboard::new();
        primary
            .expect_write_text()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("permission denied")));
        let fallback = MemoryClipboard::default();

        let via_fallback = copy_permalink(&primary, &fallback, LINK).await.unwrap();
        let direct = copy_permalink(&MemoryClipboard::default(), &MockClipboard::new(), LINK)
            .await
            .unwrap();

        assert_eq!(via_fallback, direct);
        assert_eq!(fallback.read_text().await.unwrap(), LINK);
    }

    #[tokio::test]
    async fn test_both_paths_failing_is_an_error() {
        let mut primary = MockClipboard::new();
        primary
            .expect_write_text()
            .returning(|_| Err(anyhow::anyhow!("denied")));
        let mut fallback = MockClipboard::new();
        fallback
            .expect_write_text()
            .returning(|_| Err(anyhow::anyhow!("also denied")));

        assert!(copy_permalink(&primary, &fallback, LINK).await.is_err());
    }
}
