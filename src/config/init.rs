use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::Path;

use crate::scoring::{Component, Criterion, MAX_WEIGHT, MIN_WEIGHT, RESERVED_CRITERION_NAMES};
use crate::study::{save_study, StudyFile};

/// Line-based prompt over any reader/writer pair, so the wizard can be driven
/// from tests.
struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Prompt user with a message and return their trimmed input.
    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush stdout")?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            anyhow::bail!("Input closed before the wizard finished");
        }
        Ok(line.trim().to_string())
    }

    /// Prompt user with a message and a default value. Returns default if input is empty.
    fn prompt_with_default(&mut self, message: &str, default: &str) -> Result<String> {
        let input = self.prompt(&format!("{} [{}]: ", message, default))?;
        if input.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(input)
        }
    }

    /// Prompt user with a yes/no question. Returns bool based on input and default.
    fn prompt_yes_no(&mut self, message: &str, default_yes: bool) -> Result<bool> {
        let hint = if default_yes { "Y/n" } else { "y/N" };
        let input = self.prompt(&format!("{} [{}]: ", message, hint))?;
        let input = input.to_lowercase();
        if input.is_empty() {
            Ok(default_yes)
        } else {
            Ok(input == "y" || input == "yes")
        }
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text).context("Failed to write output")
    }
}

/// Lowercase id derived from a display name ("Noise Figure" -> "noise-figure").
fn slug(name: &str) -> String {
    let mut slug = String::new();
    for c in name.trim().chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Make `base` unique among `taken` by appending a counter.
fn unique_id(base: String, taken: &[String]) -> String {
    let base = if base.is_empty() { "item".to_string() } else { base };
    if !taken.contains(&base) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Ask for study name, criteria and components. Scores are left empty: they
/// come from datasheet extraction or manual entry afterwards.
fn build_study<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<StudyFile> {
    let name = prompter.prompt_with_default("Study name", "Trade study")?;

    prompter.say("")?;
    prompter.say("Criteria are the dimensions every candidate is scored on (0-10).")?;
    prompter.say(&format!(
        "Weights use a {}-{} scale: higher means the criterion matters more.",
        MIN_WEIGHT, MAX_WEIGHT
    ))?;
    prompter.say("Leave the name blank when you are done.")?;

    let mut criteria: Vec<Criterion> = Vec::new();
    loop {
        let criterion_name = prompter.prompt("Criterion name: ")?;
        if criterion_name.is_empty() {
            if criteria.is_empty() {
                prompter.say("  At least one criterion is required.")?;
                continue;
            }
            break;
        }
        if criteria.iter().any(|c| c.name == criterion_name) {
            prompter.say("  A criterion with that name already exists.")?;
            continue;
        }
        if RESERVED_CRITERION_NAMES.contains(&criterion_name.as_str()) {
            prompter.say("  That name is reserved for export columns.")?;
            continue;
        }

        let weight = loop {
            let input = prompter.prompt_with_default("  Weight", "5")?;
            match input.parse::<f64>() {
                Ok(w) if (MIN_WEIGHT..=MAX_WEIGHT).contains(&w) => break w,
                _ => prompter.say(&format!(
                    "  Invalid: must be a number from {} to {}. Try again.",
                    MIN_WEIGHT, MAX_WEIGHT
                ))?,
            }
        };
        let unit = prompter.prompt("  Unit (optional): ")?;
        let higher_is_better = prompter.prompt_yes_no("  Higher is better?", true)?;

        let taken: Vec<String> = criteria.iter().map(|c| c.id.clone()).collect();
        let id = unique_id(slug(&criterion_name), &taken);
        criteria.push(Criterion {
            unit: (!unit.is_empty()).then_some(unit),
            higher_is_better,
            ..Criterion::new(id, criterion_name, weight)
        });
    }

    prompter.say("")?;
    prompter.say("Now add the candidate components. Leave the manufacturer blank when you are done.")?;

    let mut components: Vec<Component> = Vec::new();
    loop {
        let manufacturer = prompter.prompt("Manufacturer: ")?;
        if manufacturer.is_empty() {
            break;
        }
        let part_number = loop {
            let p = prompter.prompt("  Part number: ")?;
            if !p.is_empty() {
                break p;
            }
            prompter.say("  Part number is required.")?;
        };

        let taken: Vec<String> = components.iter().map(|c| c.id.clone()).collect();
        let id = unique_id(slug(&format!("{} {}", manufacturer, part_number)), &taken);
        components.push(Component::new(id, manufacturer, part_number));
    }

    Ok(StudyFile {
        name: Some(name),
        criteria,
        components,
        scores: Vec::new(),
        analysis: None,
    })
}

/// Run the interactive init wizard to create a study file at `path`.
pub fn run_init_wizard(path: &Path) -> Result<()> {
    let stdin = std::io::stdin();
    let mut prompter = Prompter {
        input: stdin.lock(),
        output: std::io::stdout(),
    };

    prompter.say("")?;
    prompter.say("Trade Study Wizard")?;
    prompter.say("==================")?;
    prompter.say("")?;

    // Check if file already exists
    if path.exists() {
        let overwrite = prompter.prompt_yes_no(
            &format!("Study already exists at {}. Overwrite?", path.display()),
            false,
        )?;
        if !overwrite {
            prompter.say("Aborted.")?;
            return Ok(());
        }
    }

    let study = build_study(&mut prompter)?;
    save_study(path, &study)?;

    prompter.say("")?;
    prompter.say(&format!(
        "Study written to {} ({} criteria, {} components)",
        path.display(),
        study.criteria.len(),
        study.components.len()
    ))?;
    prompter.say("Add scores under `scores:` and run `trade-study rank` to get started.")?;

    Ok(())
}
