//! Property tests for template expansion.

use num_complex::Complex64;
use proptest::prelude::*;

use colweave_engine::{expand_template, TokenValue};

/// `"inf"`, `"nan"`, `"i"` and friends read as numbers and take the numeric
/// pass-through instead of the plain-token path.
fn reads_as_number(token: &str) -> bool {
    token.parse::<f64>().is_ok() || token.parse::<Complex64>().is_ok()
}

/// Tokens that stay plain through every transform pass: lowercase ASCII with
/// none of the marker characters and no numeric reading.
fn arb_token() -> impl Strategy<Value = String> {
    "[a-z]{1,8}".prop_filter("token must not read as a number", |t| !reads_as_number(t))
}

fn arb_tokens(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_token(), 1..=max)
}

/// First-occurrence order with duplicates removed, the order duplicate names
/// keep in the dictionary.
fn dedup_keep_first(names: Vec<String>) -> Vec<String> {
    let mut seen = Vec::new();
    for name in names {
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

proptest! {
    #[test]
    fn single_group_names_follow_declaration_order(prefix in arb_token(), tokens in arb_tokens(6)) {
        let template = format!("{prefix}_{{{}}}", tokens.join(","));
        let args = expand_template(&template).expect("template expands");

        let expected = dedup_keep_first(
            tokens.iter().map(|token| format!("{prefix}_{token}")).collect(),
        );
        let got: Vec<String> = args.keys().cloned().collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn plain_tokens_keep_their_value(tokens in arb_tokens(6)) {
        let template = format!("c_{{{}}}", tokens.join(","));
        let args = expand_template(&template).expect("template expands");

        for (name, tuple) in &args {
            prop_assert_eq!(tuple.len(), 1);
            let m = &tuple[0];
            prop_assert_eq!(&m.value, &m.original);
            prop_assert!(m.payload.is_empty());
            let text = m.value.as_text().expect("plain tokens stay text");
            let expected = format!("c_{text}");
            prop_assert_eq!(name.as_str(), expected.as_str());
        }
    }

    #[test]
    fn ranges_expand_inclusively_in_both_directions(lo in 0u8..50, hi in 0u8..50, step in 1u8..6) {
        let template = format!("r_{{{lo}:{hi}:{step}}}");
        let args = expand_template(&template).expect("template expands");

        let (min, max) = (lo.min(hi), lo.max(hi));
        let mut expected: Vec<i64> = (i64::from(min)..=i64::from(max))
            .step_by(usize::from(step))
            .collect();
        if lo > hi {
            expected.reverse();
        }

        let got: Vec<i64> = args
            .values()
            .map(|tuple| tuple[0].value.as_int().expect("range values are ints"))
            .collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn zipping_truncates_to_the_shortest_group(a in arb_tokens(5), b in arb_tokens(5)) {
        let template = format!("z_{{{}}}_{{{}}}", a.join(","), b.join(","));
        let args = expand_template(&template).expect("template expands");

        let expected = dedup_keep_first(
            a.iter()
                .zip(&b)
                .map(|(x, y)| format!("z_{x}_{y}"))
                .collect(),
        );
        let got: Vec<String> = args.keys().cloned().collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn expansion_is_deterministic(prefix in arb_token(), tokens in arb_tokens(4), lo in 0u8..9, hi in 0u8..9) {
        let template = format!("{prefix}_{{{},{lo}:{hi}}}", tokens.join(","));
        let first = expand_template(&template).expect("template expands");
        let second = expand_template(&template).expect("template expands");
        prop_assert_eq!(
            first.into_iter().collect::<Vec<_>>(),
            second.into_iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn attribute_tokens_always_strip_the_dot(token in arb_token()) {
        let template = format!("a_{{.{token}}}");
        let args = expand_template(&template).expect("template expands");
        let (name, tuple) = args.first().expect("one entry");
        let expected = format!("a_{token}");
        prop_assert_eq!(name.as_str(), expected.as_str());
        prop_assert_eq!(&tuple[0].value, &TokenValue::Text(token));
        prop_assert!(!tuple[0].payload.is_empty());
    }
}
