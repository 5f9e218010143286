// Hanbao treasure hunt - CLI entry point.
//
// Runs one session over the built-in atlas: the unlock ceremony for the
// given words, a random level sequence for the unlocked roots, then the
// treasure map report and what to unlock next.
//
// Usage:
//   cargo run -p treasure_core -- [--seed N] [--config PATH] [--json] [--play] WORD...
//
// With --play, one answer per question is read from stdin and checked
// against the stored levels; the report then uses the recorded accuracy.
// Logging goes to stderr and is controlled with RUST_LOG (default: info).

use std::error::Error;
use std::io::{self, BufRead};
use std::time::Instant;

use hanzi_atlas::ReferenceDataset;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use treasure_core::{
    AnswerResult, EngineConfig, Level, LevelGenerator, LevelStore, Recommendations, RootDetector,
    Session, TreasureMap, TreasureMapAssembler, UnlockReport,
};

/// Everything one run produces, for `--json`.
#[derive(Serialize)]
struct RunOutput<'a> {
    unlock: &'a UnlockReport,
    levels: &'a [Level],
    answers: &'a [AnswerResult],
    treasure_map: Option<&'a TreasureMap>,
    recommendations: &'a Recommendations,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let seed: Option<u64> = parse_flag(args, "--seed")?;
    let config_path: Option<String> = parse_flag(args, "--config")?;
    let json = args.iter().any(|a| a == "--json");
    let play = args.iter().any(|a| a == "--play");
    let words = positional_args(args);

    let config = match config_path {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let dataset = ReferenceDataset::builtin()?;

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    // Unlock ceremony
    let detector = RootDetector::new(&dataset, &config);
    let unlock = detector.unlock(words.as_slice())?;

    let mut session = Session::new("cli");
    session.unlock_roots(unlock.detected_roots.iter().map(|root| root.id));

    // Levels
    let levels = if session.unlocked_roots.is_empty() {
        Vec::new()
    } else {
        LevelGenerator::new(&dataset, &config)
            .generate_session_sequence(&session.unlocked_roots, &mut rng)?
    };
    session.assign_levels(&levels);

    let mut store = LevelStore::new();
    store.extend(levels.iter().cloned());

    if !json {
        println!("=== 汉宝 · 字根寻宝 ===");
        println!("输入：{}", unlock.input_words.join("、"));
        if let Some(s) = seed {
            println!("Seed: {}", s);
        }
        println!();

        for line in &unlock.insights {
            println!("  {}", line);
        }
        if unlock.detected_roots.is_empty() {
            println!("  没有发现已知的汉字字根。");
        }
        println!();
    }

    // Play
    let mut answers = Vec::new();
    let stdin = io::stdin();
    let mut input = stdin.lock().lines();
    'levels: for (i, level) in levels.iter().enumerate() {
        if !json {
            println!("[{}/{}] {} - {}", i + 1, levels.len(), level.title, level.description);
        }
        for question in &level.questions {
            if !json {
                println!("  {}", question.content);
                for option in &question.options {
                    println!("    - {}", option);
                }
            }
            if !play {
                continue;
            }

            let started = Instant::now();
            let Some(line) = input.next() else {
                break 'levels;
            };
            let result = store.validate(level.id, question.id, &line?)?;
            session.record_answer(level.id, &result, started.elapsed().as_secs());

            if !json {
                let verdict = if result.correct { "✅ 正确" } else { "❌ 错误" };
                println!("  {} (+{}) {}", verdict, result.score, result.explanation);
                if let Some(hint) = &result.next_hint {
                    println!("  💡 {}", hint);
                }
            }
            answers.push(result);
        }
        if !json {
            println!();
        }
    }
    session.complete();

    // Treasure map
    let assembler = TreasureMapAssembler::new(&dataset, &config);
    let treasure_map = if session.unlocked_roots.is_empty() {
        None
    } else {
        Some(assembler.assemble_session(&session)?)
    };
    let recommendations = assembler.recommend(&session.unlocked_roots);

    if json {
        let output = RunOutput {
            unlock: &unlock,
            levels: &levels,
            answers: &answers,
            treasure_map: treasure_map.as_ref(),
            recommendations: &recommendations,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if let Some(map) = &treasure_map {
        println!("{}", assembler.render_report(map));
        println!();
    }

    if !recommendations.roots.is_empty() {
        println!("💡 {}：", recommendations.reason);
        for root in &recommendations.roots {
            println!("  {}", root);
        }
    }

    Ok(())
}

/// Value following `flag`, parsed. A flag without a value or with a value
/// that does not parse is an error.
fn parse_flag<T>(args: &[String], flag: &str) -> Result<Option<T>, Box<dyn Error>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(position) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    let value = args
        .get(position + 1)
        .ok_or_else(|| format!("{} needs a value", flag))?;
    value
        .parse()
        .map(Some)
        .map_err(|e| format!("invalid value for {}: {:?} ({})", flag, value, e).into())
}

/// Arguments that are neither flags nor flag values.
fn positional_args(args: &[String]) -> Vec<String> {
    let mut words = Vec::new();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" | "--config" => {
                iter.next();
            }
            "--json" | "--play" => {}
            _ => words.push(arg.clone()),
        }
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_parse_flag() {
        let args = args(&["hanbao", "--seed", "42", "电话"]);

        let seed: Option<u64> = parse_flag(&args, "--seed").unwrap();
        assert_eq!(seed, Some(42));

        let config: Option<String> = parse_flag(&args, "--config").unwrap();
        assert_eq!(config, None);
    }

    #[test]
    fn test_bad_flag_value_is_an_error() {
        let bad = args(&["hanbao", "--seed", "abc", "电话"]);
        let err = parse_flag::<u64>(&bad, "--seed").unwrap_err();
        assert!(err.to_string().contains("--seed"));

        let missing = args(&["hanbao", "电话", "--seed"]);
        assert!(parse_flag::<u64>(&missing, "--seed").is_err());
    }

    #[test]
    fn test_positional_args_skip_flags() {
        let args = args(&["hanbao", "--seed", "7", "电话", "--json", "--play", "学生"]);
        assert_eq!(positional_args(&args), vec!["电话", "学生"]);
    }
}
