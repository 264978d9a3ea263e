// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::{ArgEnum, Parser};
use color_eyre::Result;
use log::{debug, LevelFilter};
use qm_fixtures::{AllFixtures, Fixture, DEFAULT_RANDOM_SEED};
use qm_min::{
    cover::Generation,
    table::{PrimeTable, Selection},
    trace::TraceSink,
    Expression, LogicFunction, Minimizer,
};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::time::Instant;

/// Minimize Boolean functions with the Quine-McCluskey method.
#[derive(Debug, Parser)]
#[clap(name = "qm")]
pub struct QmApp {
    /// Print debug logs.
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: QmCommand,
}

#[derive(Debug, Parser)]
pub enum QmCommand {
    /// Minimize the function with the given minterms.
    Minimize {
        /// Number of input variables.
        #[clap(long)]
        vars: usize,

        /// Values whose output doesn't matter.
        #[clap(long = "dont-care", short = 'd', multiple_occurrences = true)]
        dont_cares: Vec<u32>,

        /// Print every generation and table state.
        #[clap(long)]
        trace: bool,

        /// Values for which the function is 1.
        minterms: Vec<u32>,
    },
    /// Run one of the canned demos.
    Demo {
        #[clap(arg_enum)]
        name: DemoName,

        /// Seed for the random demo.
        #[clap(long, default_value = DEFAULT_RANDOM_SEED)]
        seed: String,

        /// Print every generation and table state.
        #[clap(long)]
        trace: bool,
    },
}

#[derive(ArgEnum, Clone, Copy, Debug)]
pub enum DemoName {
    Textbook,
    DontCares,
    Random,
    Stress,
}

impl QmApp {
    pub fn exec(self) -> Result<()> {
        let level = if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        };
        TermLogger::init(
            level,
            ConfigBuilder::new().build(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )?;
        self.command.exec()
    }
}

impl QmCommand {
    pub fn exec(self) -> Result<()> {
        match self {
            Self::Minimize {
                vars,
                dont_cares,
                trace,
                minterms,
            } => {
                let function = LogicFunction::new(minterms, dont_cares, vars)?;
                run(&function, trace)
            }
            Self::Demo { name, seed, trace } => {
                let fixture = match name {
                    DemoName::Random => AllFixtures::random(&seed),
                    DemoName::Textbook => AllFixtures::get().fixture("textbook")?.clone(),
                    DemoName::DontCares => AllFixtures::get().fixture("dont-cares")?.clone(),
                    DemoName::Stress => AllFixtures::get().fixture("stress")?.clone(),
                };
                print_fixture(&fixture);
                run(fixture.function(), trace)
            }
        }
    }
}

fn print_fixture(fixture: &Fixture) {
    let function = fixture.function();
    println!("{} ({})", fixture.name(), fixture.description());
    println!("  variables:  {}", function.variable_count());
    println!("  minterms:   {:?}", function.on_set());
    println!("  dont-cares: {:?}", function.dc_set());
    println!();
}

fn run(function: &LogicFunction, trace: bool) -> Result<()> {
    let minimizer = Minimizer::default();
    let start = Instant::now();
    let expression = if trace {
        minimizer.minimize_with_trace(function, &mut StdoutTrace::default())?
    } else {
        minimizer.minimize(function)?
    };
    debug!("minimized in {:.2?}", start.elapsed());

    print_expression(&expression);
    Ok(())
}

fn print_expression(expression: &Expression) {
    println!("F = {}", expression);
}

/// Prints every snapshot to stdout as it arrives.
#[derive(Debug, Default)]
struct StdoutTrace {
    group_prints: usize,
    table_prints: usize,
}

impl TraceSink for StdoutTrace {
    fn generation(&mut self, generation: &Generation) {
        println!(
            "{}",
            generation.display().with_label_index(self.group_prints)
        );
        self.group_prints += 1;
    }

    fn table(&mut self, table: &PrimeTable) {
        println!("{}", table.display().with_label_index(self.table_prints));
        self.table_prints += 1;
    }

    fn selection(&mut self, selection: &Selection) {
        println!("{}\n", selection);
    }
}
