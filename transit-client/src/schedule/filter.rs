//! Stop-name search.
//!
//! Stop names are written inconsistently ("Main & Elm", "Main and Elm",
//! "Main @ Elm"), so both the query and each name are normalized before a
//! substring test.

use crate::domain::StopSchedule;

/// Token that the words "and" and "at" collapse to when comparing junctions.
const JUNCTION: &str = "&";

/// Keep the schedules whose stop name matches `query`.
///
/// Matching is case-insensitive; "&" reads as "and" and "@" as "at". Because
/// both symbols name a street junction, "Main & Elm" also matches
/// "Main @ Elm". A blank query keeps everything in its original order.
///
/// Surrounding whitespace in the query is part of the substring, so " elm"
/// does not match "Elm St".
pub fn filter_by_stop_name<'a>(schedules: &'a [StopSchedule], query: &str) -> Vec<&'a StopSchedule> {
    if query.trim().is_empty() {
        return schedules.iter().collect();
    }

    let spelled = spell_out_symbols(query);
    let junction = fold_junctions(query);

    schedules
        .iter()
        .filter(|s| {
            spell_out_symbols(&s.stop_name).contains(&spelled)
                || fold_junctions(&s.stop_name).contains(&junction)
        })
        .collect()
}

/// Lower-case and replace "&" with "and", "@" with "at".
pub fn spell_out_symbols(s: &str) -> String {
    s.to_lowercase().replace('&', "and").replace('@', "at")
}

/// Lower-case, split on whitespace and junction symbols, and fold the words
/// "and" / "at" into a single junction token.
///
/// Leading and trailing whitespace collapse to one space rather than
/// disappearing.
fn fold_junctions(s: &str) -> String {
    let spaced = s.to_lowercase().replace(['&', '@'], " & ");
    let words = spaced
        .split_whitespace()
        .map(|word| match word {
            "and" | "at" | "&" => JUNCTION,
            other => other,
        })
        .collect::<Vec<_>>()
        .join(" ");

    let lead = if s.starts_with(char::is_whitespace) { " " } else { "" };
    let trail = if s.ends_with(char::is_whitespace) { " " } else { "" };
    format!("{lead}{words}{trail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StopId;

    fn stop(name: &str) -> StopSchedule {
        StopSchedule {
            stop_id: StopId::new(name),
            stop_name: name.to_string(),
            times: vec![],
        }
    }

    fn names<'a>(result: &[&'a StopSchedule]) -> Vec<&'a str> {
        result.iter().map(|s| s.stop_name.as_str()).collect()
    }

    fn sample() -> Vec<StopSchedule> {
        vec![
            stop("Main and Elm Street"),
            stop("main @ elm"),
            stop("Kirkwood & Indiana"),
            stop("College Mall"),
            stop("Catherine St"),
        ]
    }

    #[test]
    fn blank_query_returns_everything_in_order() {
        let all = sample();
        for q in ["", "   ", "\t\n"] {
            let result = filter_by_stop_name(&all, q);
            assert_eq!(result.len(), all.len());
            for (got, want) in result.iter().zip(&all) {
                assert!(std::ptr::eq(*got, want));
            }
        }
    }

    #[test]
    fn symbol_query_matches_spelled_out_and_at() {
        let all = sample();
        let result = filter_by_stop_name(&all, "MAIN & ELM");
        assert_eq!(names(&result), vec!["Main and Elm Street", "main @ elm"]);
    }

    #[test]
    fn spelled_query_matches_symbol_name() {
        let all = sample();
        assert_eq!(
            names(&filter_by_stop_name(&all, "kirkwood and ind")),
            vec!["Kirkwood & Indiana"]
        );
        assert_eq!(
            names(&filter_by_stop_name(&all, "main at elm")),
            vec!["Main and Elm Street", "main @ elm"]
        );
    }

    #[test]
    fn partial_words_still_match() {
        let all = sample();
        assert_eq!(names(&filter_by_stop_name(&all, "main an")), vec!["Main and Elm Street"]);
        assert_eq!(names(&filter_by_stop_name(&all, "cat")), vec!["Catherine St"]);
    }

    #[test]
    fn padded_query_is_a_plain_substring() {
        let all = vec![stop("Elm St"), stop("Main and Elm Street"), stop("College Mall")];
        assert_eq!(
            names(&filter_by_stop_name(&all, " elm")),
            vec!["Main and Elm Street"]
        );
        assert_eq!(names(&filter_by_stop_name(&all, " mall")), vec!["College Mall"]);
        assert!(filter_by_stop_name(&all, "mall ").is_empty());
        assert_eq!(names(&filter_by_stop_name(&all, "elm ")), vec!["Elm St", "Main and Elm Street"]);
    }

    #[test]
    fn no_match() {
        let all = sample();
        assert!(filter_by_stop_name(&all, "airport").is_empty());
        assert!(filter_by_stop_name(&[], "main").is_empty());
    }

    #[test]
    fn spelled_out_normalization() {
        assert_eq!(spell_out_symbols("Main & Elm"), "main and elm");
        assert_eq!(spell_out_symbols("3rd@Walnut"), "3rdatwalnut");
    }

    #[test]
    fn junction_folding() {
        assert_eq!(fold_junctions("Main & Elm"), "main & elm");
        assert_eq!(fold_junctions("main@elm"), "main & elm");
        assert_eq!(fold_junctions("Main  AND   Elm"), "main & elm");
        assert_eq!(fold_junctions("Atwater at Eagleson"), "atwater & eagleson");
        assert_eq!(fold_junctions("  main and elm "), " main & elm ");
    }
}
