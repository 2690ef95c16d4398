use std::io::{BufRead, Write};
use tracing::warn;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::extract::{build_state_url_dict, get_sites_for_state};
use crate::fetch::{Gateway, HttpGet};
use crate::places::get_nearby_places;
use crate::site::NationalSite;

const RULE: &str = "-------------------------------------";
const STATE_PROMPT: &str = "\n Enter the name of a state or type 'exit': ";
const SITE_PROMPT: &str =
    "\n Enter a park number to see nearby places, or type 'back' to find parks in a different state: ";
const STATE_ERROR: &str = "\n ERROR. Accepts only a US state or 'exit'.";

enum Flow {
    Back,
    Exit,
}

pub struct Shell<C> {
    gateway: Gateway<C>,
    base_url: String,
    radius_url: String,
    api_key: String,
}

impl<C: HttpGet> Shell<C> {
    pub fn new(gateway: Gateway<C>, config: &Config) -> Self {
        Shell {
            gateway,
            base_url: config.base_url.clone(),
            radius_url: config.radius_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn gateway(&self) -> &Gateway<C> {
        &self.gateway
    }

    /// Runs until `exit` or end of input. Failures while handling a state are
    /// reported with one generic message and the state prompt comes back;
    /// only console I/O errors end the loop early.
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> Result<()> {
        loop {
            let Some(state) = prompt(input, output, STATE_PROMPT)? else {
                return Ok(());
            };
            if state == "exit" {
                return Ok(());
            }

            match self.explore_state(&state, input, output) {
                Ok(Flow::Exit) => return Ok(()),
                Ok(Flow::Back) => {}
                Err(AppError::IoError(e)) => return Err(AppError::IoError(e)),
                Err(e) => {
                    warn!("Could not list sites for '{}': {}", state, e);
                    writeln!(output, "{}", STATE_ERROR)?;
                }
            }
        }
    }

    fn explore_state<R: BufRead, W: Write>(&mut self, state: &str, input: &mut R, output: &mut W) -> Result<Flow> {
        let states = build_state_url_dict(&mut self.gateway, &self.base_url)?;
        let state_url = states
            .get(state)
            .ok_or_else(|| AppError::UnknownStateError(state.to_string()))?;
        let sites = get_sites_for_state(&mut self.gateway, &self.base_url, state_url)?;

        writeln!(output, "{}", RULE)?;
        writeln!(output, "List of National Sites in {}", title_case(state))?;
        writeln!(output, "{}", RULE)?;
        for (i, site) in sites.iter().enumerate() {
            writeln!(output, "[{}] {}", i + 1, site)?;
        }

        loop {
            let Some(choice) = prompt(input, output, SITE_PROMPT)? else {
                return Ok(Flow::Exit);
            };
            match choice.as_str() {
                "exit" => return Ok(Flow::Exit),
                "back" => return Ok(Flow::Back),
                _ => {}
            }

            let Some(site) = pick(&choice, &sites) else {
                writeln!(
                    output,
                    "\n ERROR. Accepts only an integer between 1 and {},'back', or 'exit'. ",
                    sites.len()
                )?;
                continue;
            };

            let places = get_nearby_places(&mut self.gateway, &self.radius_url, &self.api_key, site)?;

            writeln!(output, "\n {}", RULE)?;
            writeln!(output, "Places near {}", site.name)?;
            writeln!(output, "{}", RULE)?;
            for line in places.lines() {
                writeln!(output, "{}", line)?;
            }
        }
    }
}

/// Prints `text`, reads one line and returns it trimmed and lowercased.
/// `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> Result<Option<String>> {
    write!(output, "{}", text)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

/// 1-based pick; only plain digit strings count.
fn pick<'a>(choice: &str, sites: &'a [NationalSite]) -> Option<&'a NationalSite> {
    if choice.is_empty() || !choice.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let index: usize = choice.parse().ok()?;
    index.checked_sub(1).and_then(|i| sites.get(i))
}

/// Uppercases the first letter of every word, lowercases the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if prev_alpha {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }
    out
}
