//! kwexpand - 한글 음절 기반 자동완성 키워드 확장 CLI
//!
//! 자동완성 응답은 JSON 파일(`{ "쿼리": ["제안", ...] }`)에서 읽는다.

use kwexpand::config::load_config;
use kwexpand::core::syllable_table::{korean_syllable_strings, korean_syllables};
use kwexpand::expand::{
    Compose, ExpandOptions, Expander, Normalization, ProgressiveRequest, StaticAutocomplete,
};
use kwexpand::typing_sequence;
use log::error;
use serde::Serialize;

const USAGE: &str = "\
사용법:
  kwexpand syllables
  kwexpand typing <단어>
  kwexpand expand <키워드> [--fixture <파일>] [--suffix] [--strip-ws] [--batch-size <n>] [--delay <ms>]
                  [--typing <단어>] [--start <n>] [--count <n>]
  kwexpand progressive <키워드> <접미어> [--fixture <파일>] [--batch <n>] [--carry <파일>]";

/// 명령행 옵션
#[derive(Debug, Default)]
struct Args {
    positional: Vec<String>,
    fixture: Option<String>,
    suffix: bool,
    strip_ws: bool,
    batch_size: Option<usize>,
    delay_ms: Option<u64>,
    batch: usize,
    carry: Option<String>,
    /// 음절 대신 이 단어의 타이핑 상태로 확장
    typing: Option<String>,
    start: Option<usize>,
    count: Option<usize>,
}

impl Args {
    fn paged(&self) -> bool {
        self.start.is_some() || self.count.is_some()
    }
}

fn parse_args(mut iter: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut args = Args::default();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--fixture" => args.fixture = Some(value(&mut iter, &arg)?),
            "--carry" => args.carry = Some(value(&mut iter, &arg)?),
            "--typing" => args.typing = Some(value(&mut iter, &arg)?),
            "--start" => args.start = Some(number(&mut iter, &arg)?),
            "--count" => args.count = Some(number(&mut iter, &arg)?),
            "--suffix" => args.suffix = true,
            "--strip-ws" => args.strip_ws = true,
            "--batch-size" => args.batch_size = Some(number(&mut iter, &arg)?),
            "--delay" => args.delay_ms = Some(number(&mut iter, &arg)?),
            "--batch" => args.batch = number(&mut iter, &arg)?,
            _ if arg.starts_with("--") => return Err(format!("알 수 없는 옵션: {}", arg)),
            _ => args.positional.push(arg),
        }
    }

    Ok(args)
}

fn value(iter: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    iter.next().ok_or_else(|| format!("{} 값이 없습니다", flag))
}

fn number<T: std::str::FromStr>(
    iter: &mut impl Iterator<Item = String>,
    flag: &str,
) -> Result<T, String> {
    let raw = value(iter, flag)?;
    raw.parse()
        .map_err(|_| format!("{} 값이 숫자가 아닙니다: {}", flag, raw))
}

/// expand 명령이 붙일 상태 목록: --typing이 있으면 타이핑 상태, 없으면 196개 음절
fn expansion_states(args: &Args) -> Vec<String> {
    match &args.typing {
        Some(word) => typing_sequence(word),
        None => korean_syllable_strings().to_vec(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}

async fn load_fetcher(path: Option<&str>) -> Result<StaticAutocomplete, String> {
    match path {
        Some(path) => StaticAutocomplete::load(path).await.map_err(|e| e.to_string()),
        None => {
            log::warn!("--fixture 미지정: 모든 쿼리가 빈 결과를 반환합니다");
            Ok(StaticAutocomplete::new())
        }
    }
}

async fn run(command: &str, args: Args) -> Result<(), String> {
    let config = load_config();

    let mut options: ExpandOptions = config.expand.clone();
    if args.suffix {
        options.compose = Compose::Suffix;
    }
    if args.strip_ws {
        options.normalization = Normalization::LowercaseNoWhitespace;
    }
    if let Some(batch_size) = args.batch_size {
        options.batch_size = batch_size;
    }
    if let Some(delay_ms) = args.delay_ms {
        options.delay_ms = delay_ms;
    }
    let fixture = args.fixture.clone().or(config.fixture_path.clone());

    match command {
        "syllables" => {
            let table: String = korean_syllables().iter().map(|s| s.as_char()).collect();
            println!("{}", table);
            Ok(())
        }
        "typing" => {
            let word = args.positional.first().ok_or(USAGE)?;
            for state in typing_sequence(word) {
                println!("{}", state);
            }
            Ok(())
        }
        "expand" => {
            let keyword = args.positional.first().ok_or(USAGE)?;
            let fetcher = load_fetcher(fixture.as_deref()).await?;
            let expander = Expander::new(fetcher, options);
            let states = expansion_states(&args);

            if args.paged() {
                let start = args.start.unwrap_or(0);
                let count = args
                    .count
                    .unwrap_or_else(|| states.len().saturating_sub(start).max(1));
                let page = expander
                    .expand_page(keyword, &states, start, count)
                    .await
                    .map_err(|e| e.to_string())?;
                return print_json(&page);
            }

            let report = match args.typing {
                Some(_) => expander.run(keyword, &states).await,
                None => expander.expand_syllables(keyword).await,
            }
            .map_err(|e| e.to_string())?;
            print_json(&report)
        }
        "progressive" => {
            let (Some(keyword), Some(suffix)) = (args.positional.first(), args.positional.get(1))
            else {
                return Err(USAGE.to_string());
            };
            let mut request = ProgressiveRequest::new(keyword.as_str(), suffix.as_str());
            request.batch_index = args.batch;
            if let Some(carry) = &args.carry {
                let content = std::fs::read_to_string(carry).map_err(|e| e.to_string())?;
                let keywords: Vec<String> =
                    serde_json::from_str(&content).map_err(|e| e.to_string())?;
                request.phase1_keywords = Some(keywords);
            }

            let fetcher = load_fetcher(fixture.as_deref()).await?;
            let expander = Expander::new(fetcher, options);
            let page = expander
                .progressive(&request)
                .await
                .map_err(|e| e.to_string())?;
            print_json(&page)
        }
        _ => Err(USAGE.to_string()),
    }
}

#[tokio::main]
async fn main() {
    // 로깅 초기화 (error/warn만 출력)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut raw = std::env::args().skip(1);
    let Some(command) = raw.next() else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };

    let args = match parse_args(raw) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&command, args).await {
        error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, String> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_expand_flags() {
        let args = parse(&["노트북", "--typing", "추천", "--start", "3", "--count", "2"]).unwrap();
        assert_eq!(args.positional, vec!["노트북"]);
        assert_eq!(args.typing.as_deref(), Some("추천"));
        assert_eq!(args.start, Some(3));
        assert_eq!(args.count, Some(2));
        assert!(args.paged());

        assert!(!parse(&["노트북"]).unwrap().paged());
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&["--start", "abc"]).is_err());
        assert!(parse(&["--count"]).is_err());
        assert!(parse(&["--unknown"]).is_err());
    }

    #[test]
    fn test_expansion_states() {
        let syllables = expansion_states(&parse(&["k"]).unwrap());
        assert_eq!(syllables.len(), 196);
        assert_eq!(syllables[0], "가");

        let typing = expansion_states(&parse(&["k", "--typing", "추천"]).unwrap());
        assert_eq!(typing, vec!["ㅊ", "추", "추ㅊ", "추처", "추천"]);
    }
}
