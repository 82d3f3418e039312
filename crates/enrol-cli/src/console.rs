//! Line-oriented terminal I/O for the menus.
//!
//! Generic over the reader and writer so the menus can be driven from a
//! script in tests. End of input is reported as `None`, never as an error.

use std::{
  fmt::Display,
  io::{BufRead, Write},
};

use anyhow::{Context, Result};

const RULE: &str = "---------------------------------";

pub struct Console<R, W> {
  input:  R,
  output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
  pub fn new(input: R, output: W) -> Self { Self { input, output } }

  pub fn into_output(self) -> W { self.output }

  /// Print one line.
  pub fn say(&mut self, text: impl Display) -> Result<()> {
    writeln!(self.output, "{text}").context("writing to terminal")
  }

  /// Print `prompt` without a newline and read one trimmed line.
  pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
    write!(self.output, "{prompt}").context("writing to terminal")?;
    self.output.flush().context("flushing terminal")?;

    let mut line = String::new();
    let read = self
      .input
      .read_line(&mut line)
      .context("reading from terminal")?;
    if read == 0 {
      return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
  }

  /// Ask a yes/no question. Only `y`/`Y` counts as yes.
  pub fn confirm(&mut self, prompt: &str) -> Result<Option<bool>> {
    Ok(
      self
        .ask(prompt)?
        .map(|answer| answer.eq_ignore_ascii_case("y")),
    )
  }

  /// Wait for the user to press enter.
  pub fn pause(&mut self) -> Result<Option<()>> {
    Ok(
      self
        .ask("\nPress any key or 'B' to return to the Menu.\n")?
        .map(|_| ()),
    )
  }

  /// The framed banner shown at the top of every page.
  pub fn header(&mut self, page: &str) -> Result<()> {
    self.say(format_args!(
      "\n{RULE}\n|    Student Enrolment System    |\n{RULE}\n -- Current Page: {page} --"
    ))
  }

  /// Print a titled list, or `empty` if there is nothing to show.
  pub fn list<T: Display>(
    &mut self,
    title: &str,
    items: impl IntoIterator<Item = T>,
    empty: &str,
  ) -> Result<usize> {
    self.say(format_args!("\n{title}:\n-----------------"))?;
    let mut shown = 0;
    for item in items {
      self.say(item)?;
      shown += 1;
    }
    if shown == 0 {
      self.say(empty)?;
    }
    Ok(shown)
  }
}
