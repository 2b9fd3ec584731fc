//! Interactive menu loop
//!
//! Reads selections line by line, re-prompting on malformed menu or unit
//! numbers. Engine failures are shown and the user is returned to the main
//! menu. End of input exits quietly.

use std::io::{BufRead, Write};

use colored::Colorize;
use metrica_units::{Quantity, UnitRegistry};
use tracing::{debug, warn};

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output;

enum Flow {
    Continue,
    Exit,
}

pub struct Menu<'a, R, W> {
    registry: &'a UnitRegistry,
    config: &'a CliConfig,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(registry: &'a UnitRegistry, config: &'a CliConfig, input: R, output: W) -> Self {
        Self {
            registry,
            config,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> CliResult<()> {
        writeln!(self.output, "{}", "Welcome to the CLI Unit Converter".green())?;
        loop {
            writeln!(self.output, "{}", output::main_menu(self.registry)?)?;
            match self.session()? {
                Flow::Continue => writeln!(self.output)?,
                Flow::Exit => break,
            }
        }
        Ok(())
    }

    /// One pass through the menu: pick a category, two units and a value
    fn session(&mut self) -> CliResult<Flow> {
        let categories = self.registry.categories();
        let exit_option = categories.len() + 1;

        let Some(option) = self.read_choice("Enter the number for the selected option: ", exit_option)? else {
            return Ok(Flow::Exit);
        };
        if option == exit_option {
            writeln!(self.output, "{}", "Exiting the program...".yellow())?;
            return Ok(Flow::Exit);
        }

        let category = categories[option - 1];
        debug!(%category, "category selected");
        writeln!(self.output)?;
        writeln!(self.output, "{}", output::category_header(self.registry, category)?)?;

        let unit_count = output::menu_units(self.registry, category)?.len();
        let Some(from_idx) = self.read_choice("Enter the origin unit number: ", unit_count)? else {
            return Ok(Flow::Exit);
        };
        let Some(to_idx) = self.read_choice("Enter the converted unit number: ", unit_count)? else {
            return Ok(Flow::Exit);
        };
        let Some(value) = self.read_value("Enter the number to be converted: ")? else {
            return Ok(Flow::Exit);
        };

        let units = output::menu_units(self.registry, category)?;
        let (from, to) = (&units[from_idx - 1], &units[to_idx - 1]);

        match self.registry.convert(category, &from.symbol, &to.symbol, value) {
            Ok(result) => {
                let quantity = Quantity::new(result, to.clone());
                writeln!(self.output, "{}", output::result_line(&quantity, self.config.precision))?;
            }
            Err(err) => {
                warn!(code = err.code(), %err, "conversion rejected");
                writeln!(self.output, "{}", output::conversion_error(&err))?;
            }
        }
        Ok(Flow::Continue)
    }

    fn prompt(&mut self, text: &str) -> CliResult<Option<String>> {
        write!(self.output, "{}", text.bold().blue())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("end of input");
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Read a 1-based selection in `1..=max`
    fn read_choice(&mut self, text: &str, max: usize) -> CliResult<Option<usize>> {
        loop {
            let Some(line) = self.prompt(text)? else {
                return Ok(None);
            };
            match line.parse::<i64>() {
                Ok(n) if n >= 1 && (n as usize) <= max => return Ok(Some(n as usize)),
                Ok(_) => writeln!(self.output, "{}", output::input_error("PLEASE ENTER A VALID NUMBER"))?,
                Err(_) => writeln!(self.output, "{}", output::input_error("PLEASE ENTER A NUMBER"))?,
            }
        }
    }

    fn read_value(&mut self, text: &str) -> CliResult<Option<f64>> {
        loop {
            let Some(line) = self.prompt(text)? else {
                return Ok(None);
            };
            match line.parse::<f64>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "{}", output::input_error("PLEASE ENTER A NUMBER"))?,
            }
        }
    }
}
