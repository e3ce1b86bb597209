use pest::Parser;
use square_calls::{CallParser, Rule, normalize_call};

fn main() {
    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "  Left Touch a Quarter   # from facing couples".to_string());

    let line = normalize_call(&input);
    println!("Normalized: {line:?}");
    println!();

    match CallParser::parse(Rule::coded_call, &line) {
        Ok(pairs) => {
            println!("{}", pest_ascii_tree::into_ascii_tree(pairs.clone()).unwrap());
        }
        Err(e) => {
            eprintln!("Not a coded call: {}", e);
        }
    }
}
