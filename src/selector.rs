use crate::docs_scanner::{Category, Document};
use crate::error::PickerError;
use crate::prompt::{Input, LineReader};
use std::io::Write;

/// Anything that can be listed in a numbered menu.
pub trait Choice {
    fn display_name(&self) -> &str;
}

impl Choice for Category {
    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Choice for Document {
    fn display_name(&self) -> &str {
        &self.display_name
    }
}

pub fn display_options<T: Choice>(options: &[T], out: &mut impl Write) -> std::io::Result<()> {
    for (i, option) in options.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, option.display_name())?;
    }
    Ok(())
}

/// Keep prompting until the user picks an option by 1-based number or by
/// name (case-insensitive). `options` must not be empty.
pub fn choose<'a, T: Choice>(
    options: &'a [T],
    input: &mut impl LineReader,
    out: &mut impl Write,
) -> Result<&'a T, PickerError> {
    loop {
        display_options(options, out)?;
        write!(out, "\nEnter number or name of your choice: ")?;
        out.flush()?;

        let line = match input.read_line()? {
            Input::Line(line) => line,
            Input::Interrupted => return Err(PickerError::Cancelled),
        };

        if let Some(option) = match_choice(options, line.trim()) {
            tracing::debug!(choice = option.display_name(), "selection accepted");
            return Ok(option);
        }

        tracing::debug!(input = %line, "selection rejected");
        writeln!(out, "\nInvalid choice. Please try again.")?;
    }
}

fn match_choice<'a, T: Choice>(options: &'a [T], choice: &str) -> Option<&'a T> {
    if !choice.is_empty() && choice.bytes().all(|b| b.is_ascii_digit()) {
        if let Some(option) = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| options.get(idx))
        {
            return Some(option);
        }
    }

    let wanted = choice.to_lowercase();
    options
        .iter()
        .find(|option| option.display_name().to_lowercase() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::testing::ScriptedInput;
    use std::path::PathBuf;

    fn categories(names: &[&str]) -> Vec<Category> {
        names
            .iter()
            .map(|name| Category {
                path: PathBuf::from("docs").join(name),
                name: name.to_string(),
            })
            .collect()
    }

    fn run(options: &[Category], lines: &[&str]) -> (Result<String, PickerError>, String) {
        let mut input = ScriptedInput::lines(lines);
        let mut out = Vec::new();
        let result = choose(options, &mut input, &mut out).map(|c| c.name.clone());
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn picks_by_index() {
        let options = categories(&["guides", "api"]);
        let (picked, transcript) = run(&options, &["2"]);
        assert_eq!(picked.unwrap(), "api");
        assert!(transcript.starts_with("1. guides\n2. api\n"));
    }

    #[test]
    fn index_and_name_agree() {
        let options = categories(&["guides", "API", "howto"]);
        for (idx, option) in options.iter().enumerate() {
            let index = (idx + 1).to_string();
            let shouted = option.name.to_uppercase();
            let by_index = run(&options, &[index.as_str()]).0.unwrap();
            let by_name = run(&options, &[shouted.as_str()]).0.unwrap();
            assert_eq!(by_index, by_name);
        }
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let options = categories(&["guides"]);
        assert_eq!(run(&options, &["  Guides \t"]).0.unwrap(), "guides");
    }

    #[test]
    fn out_of_range_reprompts_with_full_list() {
        let options = categories(&["guides", "api"]);
        let (picked, transcript) = run(&options, &["0", "3", "1"]);
        assert_eq!(picked.unwrap(), "guides");
        assert_eq!(transcript.matches("Invalid choice. Please try again.").count(), 2);
        assert_eq!(transcript.matches("2. api").count(), 3);
    }

    #[test]
    fn unmatched_text_reprompts() {
        let options = categories(&["guides"]);
        let (picked, transcript) = run(&options, &["guide", "-1", "", "guides"]);
        assert_eq!(picked.unwrap(), "guides");
        assert_eq!(transcript.matches("Invalid choice").count(), 3);
    }

    #[test]
    fn numeric_names_fall_back_to_name_match() {
        let options = categories(&["2024", "2025"]);
        assert_eq!(run(&options, &["2025"]).0.unwrap(), "2025");
        assert_eq!(run(&options, &["2"]).0.unwrap(), "2025");
    }

    #[test]
    fn huge_numbers_do_not_panic() {
        let options = categories(&["guides"]);
        let (picked, _) = run(&options, &["99999999999999999999999", "1"]);
        assert_eq!(picked.unwrap(), "guides");
    }

    #[test]
    fn interrupt_propagates_as_cancellation() {
        let options = categories(&["guides"]);
        let mut input = ScriptedInput::lines(&["nope"]).then_interrupt();
        let mut out = Vec::new();
        let err = choose(&options, &mut input, &mut out).unwrap_err();
        assert!(matches!(err, PickerError::Cancelled));
    }

    #[test]
    fn documents_match_on_display_name() {
        let docs = vec![Document {
            path: PathBuf::from("docs/guides/intro.md"),
            file_name: "intro.md".into(),
            display_name: "intro".into(),
        }];
        let mut input = ScriptedInput::lines(&["intro.md", "INTRO"]);
        let mut out = Vec::new();
        let picked = choose(&docs, &mut input, &mut out).unwrap();
        assert_eq!(picked.file_name, "intro.md");
        assert_eq!(String::from_utf8(out).unwrap().matches("Invalid choice").count(), 1);
    }
}
