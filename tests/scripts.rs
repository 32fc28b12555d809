use std::fs;

use gambl::{Environment, run};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

/// What a script's header says should happen.
enum Expectation {
    /// The final value, as `print` would show it.
    Value(String),
    /// A fragment of the error message.
    Error(String),
}

fn read_expectation(content: &str) -> Option<Expectation> {
    content.lines().find_map(|line| {
                       let line = line.trim();
                       if let Some(rest) = line.strip_prefix("# expect-error:") {
                           return Some(Expectation::Error(rest.trim().to_string()));
                       }
                       line.strip_prefix("# expect:")
                           .map(|rest| Expectation::Value(rest.trim().to_string()))
                   })
}

#[test]
fn scripts_match_their_expectations() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "gambl"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expectation = read_expectation(&content)
            .unwrap_or_else(|| panic!("{path:?} has no '# expect:' header"));

        count += 1;
        let result = run(&content, &Environment::with_builtins());

        match (expectation, result) {
            (Expectation::Value(expected), Ok(value)) => {
                let shown = value.map(|v| v.to_string()).unwrap_or_default();
                assert_eq!(shown, expected, "script {path:?}");
            },
            (Expectation::Error(fragment), Err(e)) => {
                assert!(e.to_string().contains(&fragment),
                        "script {path:?} failed with {e}, expected an error containing \
                         {fragment:?}");
            },
            (Expectation::Value(expected), Err(e)) => {
                panic!("script {path:?} failed:\nError: {e}\nexpected {expected}")
            },
            (Expectation::Error(fragment), Ok(value)) => {
                panic!("script {path:?} succeeded with {value:?}, expected an error containing \
                        {fragment:?}")
            },
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}
