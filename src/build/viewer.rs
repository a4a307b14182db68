//! Opening the finished PDF in the desktop viewer

use std::path::Path;
use std::process::Command;

/// Command that hands `pdf` to the platform's default viewer
pub fn viewer_command(pdf: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(pdf);
        cmd
    } else if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(pdf);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(pdf);
        cmd
    }
}

/// Open `pdf` without waiting for the viewer to exit
///
/// Returns whether the viewer was launched. Failures are logged only.
pub fn open_viewer(pdf: &Path) -> bool {
    if !pdf.is_file() {
        tracing::warn!("Not opening {}: file does not exist", pdf.display());
        return false;
    }

    let mut cmd = viewer_command(pdf);
    match cmd.spawn() {
        Ok(_) => {
            tracing::info!("Opened {}", pdf.display());
            true
        }
        Err(e) => {
            tracing::warn!(
                "Could not launch {}: {}",
                cmd.get_program().to_string_lossy(),
                e
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_command_passes_pdf_last() {
        let cmd = viewer_command(Path::new("deck_slides.pdf"));
        let last = cmd.get_args().last().map(|a| a.to_string_lossy().into_owned());
        assert_eq!(last.as_deref(), Some("deck_slides.pdf"));
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn test_linux_uses_xdg_open() {
        assert_eq!(viewer_command(Path::new("a.pdf")).get_program(), "xdg-open");
    }

    #[test]
    fn test_missing_pdf_is_not_opened() {
        assert!(!open_viewer(Path::new("no/such/deck_slides.pdf")));
    }
}
