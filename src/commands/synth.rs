// src/commands/synth.rs

use std::path::Path;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand::rngs::StdRng;
use unitsynth_gen::{Generator, RandomValues, Synthesizer, WordNames};
use unitsynth_syntax::{FuncDecl, GoPrinter, PackageIndex, SymbolResolver};

use crate::config::Config;

/// Options for the `synth` command.
pub struct SynthOptions<'a> {
    pub model: &'a Path,
    pub function: Option<&'a str>,
    pub config: Option<&'a Path>,
    pub seed: Option<u64>,
}

/// Synthesize and print the input section of every test case for the root
/// package of a source model.
pub fn synth_model(options: SynthOptions<'_>) -> ExitCode {
    let mut config = match Config::load_or_default(options.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    if options.seed.is_some() {
        config.generator.seed = options.seed;
    }

    let index = match PackageIndex::load(options.model) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Use the configured seed or derive one from the current time
    let seed = config.generator.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    tracing::info!(seed, model = %options.model.display(), "synthesizing test inputs");

    let mut values = RandomValues::new(StdRng::seed_from_u64(seed), config.values.clone());
    let mut names = WordNames::new(StdRng::seed_from_u64(seed.wrapping_add(1)));
    let synth = Synthesizer::new(&index, &mut values, &mut names);
    let mut generator = Generator::new(synth, &config.overrides, &config.generator);

    let mut found = 0;
    for (handle, file) in index.root_files() {
        let functions: Vec<FuncDecl> = file
            .functions
            .iter()
            .filter(|f| options.function.is_none_or(|name| f.name == name))
            .cloned()
            .collect();
        if functions.is_empty() {
            continue;
        }
        let package = index.package_name_for(handle);
        let Some(generated) = generator.generate_file(package, &file.name, &functions, handle)
        else {
            continue;
        };
        let suite = generated.suite_name();
        for (key, cases) in &generated.test_cases {
            found += 1;
            for (i, case) in cases.iter().enumerate() {
                println!("// {suite}/{key} #{}", i + 1);
                println!("{}", case.render(&GoPrinter));
            }
        }
    }

    if let Some(name) = options.function
        && found == 0
    {
        eprintln!("error: no function named '{name}' in the root package");
        return ExitCode::FAILURE;
    }
    println!("// seed: {seed}");
    ExitCode::SUCCESS
}
