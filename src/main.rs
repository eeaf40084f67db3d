use jitcalc::{evaluate_expression, CallbackRegistry, PipelineConfig, CALLBACKS};
use std::process;

fn usage(program: &str) -> ! {
    eprintln!("usage: {} [-c CALLBACK] EXPRESSION", program);
    eprintln!("       {} --list", program);
    process::exit(1);
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("jitcalc");

    let mut callback = "identity".to_string();
    let mut expression: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--callback" => {
                i += 1;
                match args.get(i) {
                    Some(name) => callback = name.clone(),
                    None => usage(program),
                }
            }
            "-l" | "--list" => {
                for def in CALLBACKS {
                    println!("{:10} {}", def.name, def.doc);
                }
                return;
            }
            arg if expression.is_none() => expression = Some(arg.to_string()),
            _ => usage(program),
        }
        i += 1;
    }

    let expression = match expression {
        Some(e) => e,
        None => usage(program),
    };

    let registry = CallbackRegistry::with_builtins();
    let config = PipelineConfig::default();

    match evaluate_expression(&expression, &callback, &registry, &config) {
        Ok(value) => println!("{}", value),
        Err(e) => {
            eprintln!("{}: {}", program, e);
            process::exit(1);
        }
    }
}
