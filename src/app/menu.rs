//! # Interactive Menu
//!
//! Thin prompt loop over a [`StegoSession`]: Encrypt, Decrypt or Quit. It
//! reads from any `BufRead` and writes to any `Write`, so the binary drives it
//! with stdin/stdout and tests drive it with in-memory buffers.
//!
//! Decrypt always reads the configured encoded-image path and saves the
//! rendered text to the configured preview path.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::Path;

use super::session::StegoSession;
use crate::io::{ImageStore, TextRenderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Encrypt,
    Decrypt,
    Quit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Encrypt),
            "2" => Some(Self::Decrypt),
            "3" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Runs the menu until the user quits or input ends.
pub fn run_menu<S, R, I, W>(session: &StegoSession<S, R>, input: &mut I, out: &mut W) -> Result<()>
where
    S: ImageStore,
    R: TextRenderer,
    I: BufRead,
    W: Write,
{
    writeln!(out, "Image Encryption and Decryption with Hidden Text")?;

    loop {
        writeln!(out, "\nOptions:")?;
        writeln!(out, "1. Encrypt")?;
        writeln!(out, "2. Decrypt")?;
        writeln!(out, "3. Quit")?;

        let Some(line) = prompt(input, out, "Enter your choice: ")? else {
            break;
        };

        match MenuChoice::parse(&line) {
            Some(MenuChoice::Encrypt) => {
                if !encrypt_prompt(session, input, out)? {
                    break;
                }
            }
            Some(MenuChoice::Decrypt) => {
                if !decrypt_prompt(session, input, out)? {
                    break;
                }
            }
            Some(MenuChoice::Quit) => break,
            None => writeln!(out, "Invalid choice. Please try again.")?,
        }
    }

    Ok(())
}

/// Returns `Ok(false)` when input ended mid-dialog.
fn encrypt_prompt<S, R, I, W>(session: &StegoSession<S, R>, input: &mut I, out: &mut W) -> Result<bool>
where
    S: ImageStore,
    R: TextRenderer,
    I: BufRead,
    W: Write,
{
    let Some(image_path) = prompt(input, out, "Enter the path to the image file: ")? else {
        return Ok(false);
    };
    let Some(text) = prompt(input, out, "Enter the text to hide: ")? else {
        return Ok(false);
    };
    let Some(key) = prompt(input, out, "Enter the encryption key: ")? else {
        return Ok(false);
    };

    match session.encrypt(Path::new(image_path.trim()), &text, &key, None) {
        Ok(path) => writeln!(
            out,
            "Text hidden and image encrypted successfully ({}).",
            path.display()
        )?,
        Err(e) => writeln!(out, "Error: {e:#}")?,
    }
    Ok(true)
}

fn decrypt_prompt<S, R, I, W>(session: &StegoSession<S, R>, input: &mut I, out: &mut W) -> Result<bool>
where
    S: ImageStore,
    R: TextRenderer,
    I: BufRead,
    W: Write,
{
    let Some(key) = prompt(input, out, "Enter the encryption key: ")? else {
        return Ok(false);
    };

    let render_to = session.config().output.rendered_text_path.clone();
    match session.decrypt(None, &key, Some(&render_to)) {
        Ok(Some(recovered)) => {
            match &recovered.rendered_to {
                Some(path) => writeln!(out, "Retrieved text saved to {}", path.display())?,
                None => writeln!(out, "Could not save retrieved text to {}", render_to.display())?,
            }
            writeln!(out, "Retrieved text: {}", recovered.text)?;
        }
        Ok(None) => writeln!(out, "Incorrect key. Text not decrypted.")?,
        Err(e) => writeln!(out, "Error: {e:#}")?,
    }
    Ok(true)
}

/// Prints `message` and reads one line without its line ending.
/// `None` means end of input.
fn prompt<I: BufRead, W: Write>(input: &mut I, out: &mut W, message: &str) -> Result<Option<String>> {
    write!(out, "{message}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let trimmed = line.strip_suffix('\n').unwrap_or(&line);
    let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
    Ok(Some(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::session::tests::{session_with_cover, MemoryStore, RecordingRenderer};
    use crate::codec::PixelGrid;
    use crate::common::config::StegoConfig;
    use std::io::Cursor;

    fn run(session: &StegoSession<MemoryStore, RecordingRenderer>, script: &str) -> String {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        run_menu(session, &mut input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(MenuChoice::parse("1\n"), Some(MenuChoice::Encrypt));
        assert_eq!(MenuChoice::parse(" 2 "), Some(MenuChoice::Decrypt));
        assert_eq!(MenuChoice::parse("3"), Some(MenuChoice::Quit));
        assert_eq!(MenuChoice::parse("4"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn test_invalid_choice_loops() {
        let session = session_with_cover(2, 2);
        let output = run(&session, "9\n3\n");

        assert!(output.contains("Invalid choice. Please try again."));
        assert_eq!(output.matches("Options:").count(), 2);
    }

    #[test]
    fn test_end_of_input_exits() {
        let session = session_with_cover(2, 2);
        let output = run(&session, "1\ncover.png\n");
        assert!(!output.contains("successfully"));
    }

    #[test]
    fn test_encrypt_then_decrypt() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = StegoConfig::default();
        config.output.rendered_text_path = dir.path().join("retrieved_text.png");

        let session = StegoSession::new(
            MemoryStore::with("cover.png", PixelGrid::new(10, 10, 3).unwrap()),
            RecordingRenderer::default(),
            config,
        );

        let output = run(
            &session,
            "1\ncover.png\nhello world\nsecret\n2\nwrong\n2\nsecret\n3\n",
        );

        assert!(output.contains("Text hidden and image encrypted successfully"));
        assert!(output.contains("Incorrect key. Text not decrypted."));
        assert!(output.contains("Retrieved text: hello world"));
        assert_eq!(*session.renderer().calls.borrow(), vec!["hello world".to_string()]);
        assert!(dir.path().join("retrieved_text.png").exists());
    }

    #[test]
    fn test_decrypt_shows_text_when_preview_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = StegoConfig::default();
        config.output.rendered_text_path = dir.path().join("no_such_dir").join("out.png");

        let session = StegoSession::new(
            MemoryStore::with("cover.png", PixelGrid::new(10, 10, 3).unwrap()),
            RecordingRenderer::default(),
            config,
        );

        let output = run(&session, "1\ncover.png\nhello\nk\n2\nk\n3\n");

        assert!(output.contains("Could not save retrieved text"));
        assert!(output.contains("Retrieved text: hello"));
        assert!(!output.contains("Error:"));
    }

    #[test]
    fn test_encrypt_error_keeps_menu_running() {
        let session = session_with_cover(1, 1);
        let output = run(&session, "1\ncover.png\nway too long\nk\n3\n");

        assert!(output.contains("Error: image too small to hide the text"));
        assert_eq!(output.matches("Options:").count(), 2);
    }
}
