#[cfg(test)]
mod tests {
    use super::super::*;

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    const SAMPLES: [f64; 7] = [0.0, 0.25, 1.0, 3.5, 17.0, 250.75, 10_000.0];

    #[test]
    fn test_round_trip_every_unit() {
        for system in System::ALL {
            let converter = Converter::new(system);
            for unit in converter.table().names() {
                for x in SAMPLES {
                    let base = converter.to_base(x, unit, 10).unwrap();
                    let back = converter.from_base(base, unit, 6).unwrap();
                    assert!(
                        approx(back, x, 1e-5),
                        "{} {} round-tripped to {}",
                        x,
                        unit,
                        back
                    );
                }
            }
        }
    }

    #[test]
    fn test_composition_through_intermediate_unit() {
        for system in System::ALL {
            let converter = Converter::new(system);
            let names = converter.table().names();
            for a in &names {
                for b in &names {
                    for c in &names {
                        let direct = converter.convert(3.5, a, b, 12).unwrap();
                        let via = converter.convert(3.5, a, c, 12).unwrap();
                        let via = converter.convert(via, c, b, 12).unwrap();
                        let tol = 1e-9 * direct.max(1.0) + 1e-8;
                        assert!(
                            approx(direct, via, tol),
                            "{} -> {} direct {} vs via {} {}",
                            a,
                            b,
                            direct,
                            c,
                            via
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_cross_system_round_trip() {
        for terai in TERAI_UNITS {
            for hilly in HILLY_UNITS {
                for x in SAMPLES {
                    let there = convert_across_systems(x, terai, hilly, 8).unwrap();
                    let back = convert_across_systems(there, hilly, terai, 8).unwrap();
                    assert!(
                        approx(back, x, 1e-4 * x.max(1.0)),
                        "{} {} -> {} -> {}",
                        x,
                        terai,
                        hilly,
                        back
                    );
                }
            }
        }
    }

    const TERAI_UNITS: [&str; 3] = ["bigha", "kattha", "dhur"];
    const HILLY_UNITS: [&str; 4] = ["ropani", "aana", "paisa", "daam"];

    #[test]
    fn test_mixed_parse_format_inverse() {
        for system in System::ALL {
            let smallest = *system.mixed_units().last().unwrap();
            let factor = system.table().lookup(smallest).unwrap().factor;
            for x in [0.0, 1.0, 16.93, 508.72, 8632.08, 123_456.789] {
                for precision in [2, 4, 6] {
                    let text = format_mixed(x, system, precision).unwrap();
                    let parsed = parse_mixed(&text, system).unwrap();
                    let tol = 10f64.powi(-precision) * factor + 1e-9 * x;
                    assert!(
                        approx(parsed, x, tol),
                        "{} -> '{}' -> {}",
                        x,
                        text,
                        parsed
                    );
                }
            }
        }
    }

    #[test]
    fn test_case_insensitive_cross_conversion() {
        assert_eq!(
            convert_across_systems(2.0, "BIGHA", "ropani", 4).unwrap(),
            convert_across_systems(2.0, "bigha", "ROPANI", 4).unwrap()
        );
    }

    #[test]
    fn test_errors_are_deterministic() {
        for _ in 0..3 {
            assert!(matches!(
                convert_to_base(-1.0, "bigha", 4),
                Err(ConversionError::InvalidInput(_))
            ));
            assert!(matches!(
                convert_to_base(1.0, "bigha", -1),
                Err(ConversionError::InvalidInput(_))
            ));
            assert!(matches!(
                convert_to_base(1.0, "hectare", 4),
                Err(ConversionError::UnknownUnit { .. })
            ));
        }
    }

    #[test]
    fn test_concrete_scenarios() {
        assert!(approx(convert_to_base(1.0, "bigha", 4).unwrap(), 6772.63, 1e-9));
        assert!(approx(
            convert_unit_to_unit(1.0, "ropani", "aana", 4).unwrap(),
            16.0,
            0.01
        ));
        assert!(approx(
            convert_across_systems(1.0, "bigha", "ropani", 4).unwrap(),
            13.31,
            0.01
        ));
        let (_, total) = parse_mixed_expression("1 bigha 5 kattha 10 dhur").unwrap();
        assert!(approx(total, 8632.08, 8632.08 * 0.01));
        assert_eq!(
            format_mixed(0.0, System::Terai, 4).unwrap(),
            "0 bigha 0 kattha 0.0000 dhur"
        );
        assert!(matches!(
            parse_mixed_expression("-1 bigha"),
            Err(ConversionError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_out_of_range_values_are_errors() {
        for result in [
            convert_to_base(1e305, "bigha", 4),
            convert_from_base(f64::MAX, "daam", 4),
            convert_across_systems(1e305, "bigha", "ropani", 4),
            parse_mixed_expression("1e305 bigha").map(|(_, total)| total),
        ] {
            assert!(
                matches!(result, Err(ConversionError::InvalidInput(_))),
                "got {:?}",
                result
            );
        }
    }

    #[test]
    fn test_exponent_tokens_beyond_f64_are_malformed() {
        for text in ["1e400 bigha", "1 ropani 1e999 aana", "-1e400 tola"] {
            let result = parse_mixed_expression(text);
            assert!(
                matches!(result, Err(ConversionError::MalformedExpression { .. })),
                "'{}' gave {:?}",
                text,
                result
            );
        }
        // small exponents are ordinary numbers
        let (_, total) = parse_mixed_expression("1e1 dhur").unwrap();
        assert!(approx(total, 169.3, 1e-9));
    }

    #[test]
    fn test_negative_zero_is_plain_zero() {
        assert_eq!(
            format_mixed(-0.0, System::Hilly, 2).unwrap(),
            "0 ropani 0 aana 0 paisa 0.00 daam"
        );
        assert!(convert_to_base(-0.0, "tola", 4).unwrap().is_sign_positive());
        assert!(convert_across_systems(-0.0, "bigha", "ropani", 4)
            .unwrap()
            .is_sign_positive());

        let (_, total) = parse_mixed_expression("-0 bigha").unwrap();
        assert!(total.is_sign_positive());
        assert_eq!(
            terai_mixed_to_hilly_mixed("-0 bigha", 4).unwrap(),
            "0 ropani 0 aana 0 paisa 0.0000 daam"
        );
    }

    #[test]
    fn test_request_execute() {
        let request = ConversionRequest {
            value: 1.0,
            from_unit: "bigha".to_string(),
            to_unit: "kattha".to_string(),
            precision: 2,
        };
        assert_eq!(request.execute().unwrap(), 20.0);

        let request = ConversionRequest {
            value: 1.0,
            from_unit: "bigha".to_string(),
            to_unit: "ropani".to_string(),
            precision: 2,
        };
        assert_eq!(request.execute().unwrap(), 13.31);
    }
}
