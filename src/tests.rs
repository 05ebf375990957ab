//! Property-based tests for the parser and the evaluation policies.

#[cfg(test)]
mod parser_properties {
    use crate::parser::{parse_rules, Rule};
    use proptest::prelude::*;

    // Strategy for specs assembled from recognized tokens.
    fn known_token_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("required".to_string()),
            (0usize..100).prop_map(|n| format!("minlength:{n}")),
            (0usize..100).prop_map(|n| format!("maxlength:{n}")),
            Just("email".to_string()),
            Just("url".to_string()),
            Just("numeric".to_string()),
            Just("phone".to_string()),
            Just("password_strength".to_string()),
            "[A-Z]{2}".prop_map(|cc| format!("postalcode:{cc}")),
            Just("username_available".to_string()),
            Just("email_available".to_string()),
            Just("unique".to_string()),
        ]
    }

    fn spec_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec(known_token_strategy(), 0..6).prop_map(|tokens| tokens.join("|"))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        // Parsing is deterministic: same spec, same rules.
        #[test]
        fn parse_is_deterministic(spec in spec_strategy()) {
            prop_assert_eq!(parse_rules(&spec), parse_rules(&spec));
        }

        // Every known token parses to exactly one rule.
        #[test]
        fn known_tokens_parse_one_to_one(tokens in prop::collection::vec(known_token_strategy(), 0..6)) {
            let spec = tokens.join("|");
            prop_assert_eq!(parse_rules(&spec).len(), tokens.len());
        }

        // An unrecognized token changes nothing.
        #[test]
        fn garbage_tokens_are_inert(
            spec in spec_strategy(),
            garbage in "[a-z]{3,8}",
        ) {
            // Keep the garbage clear of the substring-matched rule names.
            prop_assume!(!garbage.contains("required"));
            prop_assume!(!garbage.contains("minlength") && !garbage.contains("maxlength"));
            prop_assume!(parse_rules(&garbage).is_empty());

            let padded = if spec.is_empty() {
                garbage
            } else {
                format!("{garbage}|{spec}")
            };
            prop_assert_eq!(parse_rules(&padded), parse_rules(&spec));
        }

        // Rendering a rule back to its token and reparsing is lossless.
        #[test]
        fn as_token_roundtrip(token in known_token_strategy()) {
            let rules = parse_rules(&token);
            prop_assert_eq!(rules.len(), 1);
            prop_assert_eq!(parse_rules(&rules[0].as_token()), rules);
        }

        // Whitespace around tokens is insignificant.
        #[test]
        fn tokens_are_trimmed(tokens in prop::collection::vec(known_token_strategy(), 1..5)) {
            let spaced = tokens
                .iter()
                .map(|t| format!("  {t} "))
                .collect::<Vec<_>>()
                .join("|");
            prop_assert_eq!(parse_rules(&spaced), parse_rules(&tokens.join("|")));
        }
    }

    #[test]
    fn custom_rules_never_come_from_the_parser() {
        // Exhaustive over the grammar's tokens plus arbitrary junk: the
        // parser leaves `Custom` to the engine.
        for spec in ["required|email|unique", "custom:thing", "frobnicate"] {
            assert!(parse_rules(spec)
                .iter()
                .all(|rule| !matches!(rule, Rule::Custom { .. })));
        }
    }
}

#[cfg(test)]
mod rule_properties {
    use crate::rules::sync_rules;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        // `required` fails iff the value is the empty string.
        #[test]
        fn required_fails_iff_empty(value in ".{0,20}") {
            prop_assert_eq!(sync_rules::required(&value).is_some(), value.is_empty());
        }

        // `minlength` fails iff the character count is below the bound.
        #[test]
        fn min_length_boundary(n in 0usize..30, value in "[a-zé]{0,30}") {
            prop_assert_eq!(
                sync_rules::min_length(n, &value).is_some(),
                value.chars().count() < n
            );
        }

        // `maxlength` fails iff the character count is above the bound.
        #[test]
        fn max_length_boundary(n in 0usize..30, value in "[a-zé]{0,30}") {
            prop_assert_eq!(
                sync_rules::max_length(n, &value).is_some(),
                value.chars().count() > n
            );
        }

        // `numeric` accepts exactly nonempty ASCII digit strings.
        #[test]
        fn numeric_accepts_digits_only(value in "[0-9a-z]{0,15}") {
            let digits_only = !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit());
            prop_assert_eq!(sync_rules::numeric(&value).is_none(), digits_only);
        }
    }
}

#[cfg(test)]
mod policy_properties {
    use crate::prelude::*;
    use proptest::prelude::*;

    /// One-field environment for policy checks.
    struct SingleField {
        name: String,
        value: String,
        spec: String,
    }

    impl FormEnvironment for SingleField {
        type Handle = ();

        fn lookup_field(&self, name: &str) -> Option<()> {
            (name == self.name).then_some(())
        }

        fn read_value(&self, _handle: &()) -> String {
            self.value.clone()
        }

        fn rule_spec(&self, _handle: &()) -> String {
            self.spec.clone()
        }

        fn mark_errored(&mut self, _handle: &()) {}
        fn clear_errored(&mut self, _handle: &()) {}
        fn show_message(&mut self, _handle: &(), _text: &str) {}
        fn clear_message(&mut self, _handle: &()) {}
        fn focus(&mut self, _handle: &()) {}
        fn notify(&mut self, _notification: Notification<'_>) {}
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        // When two rules fail, the one later in the spec provides the
        // message, whichever order they appear in.
        #[test]
        fn last_failing_rule_provides_the_message(value in "[a-z]{1,10}") {
            let len = value.chars().count();
            let min = len + 1; // always fails
            let max = len.saturating_sub(1); // always fails for nonempty values

            let mut engine = ValidationEngine::new(EngineConfig::builder(["field"]).build());

            let mut env = SingleField {
                name: "field".to_string(),
                value: value.clone(),
                spec: format!("minlength:{min}|maxlength:{max}"),
            };
            engine.validate_sync(&mut env).unwrap();
            let expected_max = format!("La longueur maximale est de {max} caractères.");
            prop_assert_eq!(
                engine.errors().get("field"),
                Some(expected_max.as_str())
            );

            env.spec = format!("maxlength:{max}|minlength:{min}");
            engine.validate_sync(&mut env).unwrap();
            let expected_min = format!("La longueur minimale est de {min} caractères.");
            prop_assert_eq!(
                engine.errors().get("field"),
                Some(expected_min.as_str())
            );
        }

        // A failing custom validator wins over any failing built-in.
        #[test]
        fn custom_validator_message_wins(value in "[a-z]{1,5}") {
            let min = value.chars().count() + 1;
            let config = EngineConfig::builder(["field"])
                .custom_validator("field", |_| Some("Valeur refusée.".to_string()))
                .build();
            let mut engine = ValidationEngine::new(config);

            let mut env = SingleField {
                name: "field".to_string(),
                value,
                spec: format!("minlength:{min}"),
            };
            engine.validate_sync(&mut env).unwrap();
            prop_assert_eq!(engine.errors().get("field"), Some("Valeur refusée."));
        }

        // The probe's answer alone decides the async outcome.
        #[test]
        fn probe_answer_decides_async_outcome(
            value in "[a-z]{1,10}",
            taken in proptest::bool::ANY,
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let taken_values = if taken { vec![value.clone()] } else { vec![] };
                let config = EngineConfig::builder(["field"])
                    .probe(ProbeKind::Unique, MembershipProbe { taken: taken_values })
                    .build();
                let mut engine = ValidationEngine::new(config);

                let mut env = SingleField {
                    name: "field".to_string(),
                    value: value.clone(),
                    spec: "unique".to_string(),
                };
                let clean = engine.validate_async(&mut env).await.unwrap();

                prop_assert_eq!(clean, !taken);
                prop_assert_eq!(engine.errors().get("field").is_some(), taken);
                Ok(())
            })?;
        }
    }

    /// Probe that treats a fixed set of values as taken.
    struct MembershipProbe {
        taken: Vec<String>,
    }

    #[async_trait::async_trait]
    impl AvailabilityProbe for MembershipProbe {
        async fn check(&self, value: &str) -> Result<bool, String> {
            Ok(!self.taken.iter().any(|taken| taken == value))
        }
    }
}
