use crate::interval::Interval;
use thiserror::Error;
use tracing::{debug, trace};

/// Shifts the `length` values starting at `source_start` so that they start
/// at `dest_start` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemapRule {
    source: Interval,
    dest_start: i64,
    shift: i64,
}

impl RemapRule {
    /// Arguments are in the same order they appear on an almanac line.
    /// Returns `None` for a rule that covers nothing, or one whose source,
    /// destination or shift doesn't fit in an `i64`.
    pub fn new(dest_start: i64, source_start: i64, length: i64) -> Option<Self> {
        let source = Interval::from_start_len(source_start, length)?;
        Interval::from_start_len(dest_start, length)?;
        let shift = dest_start.checked_sub(source_start)?;
        Some(Self {
            source,
            dest_start,
            shift,
        })
    }

    /// The interval of values this rule claims.
    pub fn source(&self) -> Interval {
        self.source
    }

    pub fn source_start(&self) -> i64 {
        self.source.start()
    }

    pub fn source_end(&self) -> i64 {
        self.source.end()
    }

    pub fn dest_start(&self) -> i64 {
        self.dest_start
    }

    pub fn length(&self) -> i64 {
        self.source.len()
    }

    /// How far every claimed value moves.
    pub fn shift(&self) -> i64 {
        self.shift
    }
}

/// The effect of one rule on one interval.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleOutcome {
    /// The claimed slice, already shifted into the destination space.
    pub matched: Option<Interval>,
    /// The slices on either side of the rule's source, unshifted.
    pub unmatched: Vec<Interval>,
}

/// Splits `input` into the part `rule` claims (shifted) and the parts to the
/// left and right of the rule's source (untouched).
///
/// The claimed slice before shifting and the unmatched slices together cover
/// `input` exactly once.
pub fn apply_rule(rule: &RemapRule, input: Interval) -> RuleOutcome {
    let almanac_start = rule.source_start();
    let almanac_end = rule.source_end();
    let shift = rule.shift();

    let matched = Interval::new(
        input.start().max(almanac_start),
        input.end().min(almanac_end),
    )
    .map(|overlap| overlap.shift(shift));

    // No room on a side that sits at the edge of the i64 range
    let before = almanac_start
        .checked_sub(1)
        .and_then(|last_before| Interval::new(input.start(), input.end().min(last_before)));
    let after = almanac_end
        .checked_add(1)
        .and_then(|first_after| Interval::new(input.start().max(first_after), input.end()));

    RuleOutcome {
        matched,
        unmatched: before.into_iter().chain(after).collect(),
    }
}

/// Two rules in one stage claim some of the same values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("rules {first} and {second} of the {stage:?} stage have overlapping sources")]
pub struct OverlapError {
    pub stage: String,
    /// Index of the earlier of the two rules, in listing order.
    pub first: usize,
    /// Index of the later of the two rules, in listing order.
    pub second: usize,
}

/// One named mapping step. Values not claimed by any rule map to themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    name: String,
    rules: Vec<RemapRule>,
}

impl Stage {
    /// Rejects rule lists whose sources overlap, since the result of applying
    /// such a stage would depend on the order of the rules.
    pub fn new(name: impl Into<String>, rules: Vec<RemapRule>) -> Result<Self, OverlapError> {
        let name = name.into();
        let mut by_start = (0..rules.len()).collect::<Vec<_>>();
        by_start.sort_unstable_by_key(|idx| rules[*idx].source_start());
        for pair in by_start.windows(2) {
            let (lower, upper) = (&rules[pair[0]], &rules[pair[1]]);
            if upper.source_start() <= lower.source_end() {
                return Err(OverlapError {
                    stage: name,
                    first: pair[0].min(pair[1]),
                    second: pair[0].max(pair[1]),
                });
            }
        }
        Ok(Self { name, rules })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[RemapRule] {
        &self.rules
    }

    /// Maps a single value through this stage.
    pub fn map_point(&self, value: i64) -> i64 {
        apply_stage(self, &[Interval::point(value)])
            .first()
            .map_or(value, Interval::start)
    }
}

/// Runs `inputs` past every rule of `stage` in order. Returns the shifted
/// slices the rules claimed and, separately, whatever no rule claimed.
pub fn split_by_rules(stage: &Stage, inputs: &[Interval]) -> (Vec<Interval>, Vec<Interval>) {
    stage.rules().iter().fold(
        (Vec::new(), inputs.to_vec()),
        |(mut matched, remaining), rule| {
            let mut unmatched = Vec::with_capacity(remaining.len());
            for interval in remaining {
                let outcome = apply_rule(rule, interval);
                matched.extend(outcome.matched);
                unmatched.extend(outcome.unmatched);
            }
            (matched, unmatched)
        },
    )
}

/// Maps every interval through `stage`. The output is in no particular order.
pub fn apply_stage(stage: &Stage, inputs: &[Interval]) -> Vec<Interval> {
    let (mut outputs, unclaimed) = split_by_rules(stage, inputs);
    trace!(
        stage = stage.name(),
        matched = outputs.len(),
        unclaimed = unclaimed.len(),
        "applied stage"
    );
    // Identity mapping for anything no rule claimed
    outputs.extend(unclaimed);
    outputs
}

/// Feeds the output of each stage into the next and returns the output of the
/// last one.
pub fn run_pipeline(stages: &[Stage], initial: &[Interval]) -> Vec<Interval> {
    stages.iter().fold(initial.to_vec(), |intervals, stage| {
        let mapped = apply_stage(stage, &intervals);
        debug!(
            stage = stage.name(),
            inputs = intervals.len(),
            outputs = mapped.len(),
            "ran stage"
        );
        mapped
    })
}

/// The smallest lower bound of any interval, or `None` if there are none.
pub fn minimum_lower_bound(intervals: &[Interval]) -> Option<i64> {
    intervals.iter().map(Interval::start).min()
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;
    use proptest_derive::Arbitrary;

    fn iv(start: i64, end: i64) -> Interval {
        Interval::new(start, end).unwrap()
    }

    fn rule(dest_start: i64, source_start: i64, length: i64) -> RemapRule {
        RemapRule::new(dest_start, source_start, length).unwrap()
    }

    fn stage(rules: Vec<RemapRule>) -> Stage {
        Stage::new("test", rules).unwrap()
    }

    // INPUT:   |   |
    // ALMANAC:       |   |
    #[test]
    fn input_before_rule() {
        let outcome = apply_rule(&rule(1010, 30, 11), iv(10, 20));
        assert_eq!(outcome.matched, None);
        assert_eq!(outcome.unmatched, vec![iv(10, 20)]);
    }

    // INPUT:         |   |
    // ALMANAC: |   |
    #[test]
    fn input_after_rule() {
        let outcome = apply_rule(&rule(1010, 10, 11), iv(30, 40));
        assert_eq!(outcome.matched, None);
        assert_eq!(outcome.unmatched, vec![iv(30, 40)]);
    }

    // INPUT:       |       |
    // ALMANAC: |               |
    #[test]
    fn input_inside_rule() {
        let outcome = apply_rule(&rule(1010, 10, 31), iv(20, 30));
        assert_eq!(outcome.matched, Some(iv(1020, 1030)));
        assert!(outcome.unmatched.is_empty());
    }

    // INPUT:   |               |
    // ALMANAC:     |       |
    #[test]
    fn rule_inside_input() {
        let outcome = apply_rule(&rule(1020, 20, 11), iv(10, 40));
        assert_eq!(outcome.matched, Some(iv(1020, 1030)));
        assert_eq!(outcome.unmatched, vec![iv(10, 19), iv(31, 40)]);
    }

    // INPUT:   |      |
    // ALMANAC:    |      |
    #[test]
    fn input_overlaps_rule_start() {
        let outcome = apply_rule(&rule(1020, 20, 21), iv(10, 30));
        assert_eq!(outcome.matched, Some(iv(1020, 1030)));
        assert_eq!(outcome.unmatched, vec![iv(10, 19)]);
    }

    // INPUT:      |      |
    // ALMANAC: |      |
    #[test]
    fn input_overlaps_rule_end() {
        let outcome = apply_rule(&rule(1010, 10, 21), iv(20, 40));
        assert_eq!(outcome.matched, Some(iv(1020, 1030)));
        assert_eq!(outcome.unmatched, vec![iv(31, 40)]);
    }

    #[test]
    fn rule_flush_with_input_start() {
        let outcome = apply_rule(&rule(0, 10, 5), iv(10, 20));
        assert_eq!(outcome.matched, Some(iv(0, 4)));
        assert_eq!(outcome.unmatched, vec![iv(15, 20)]);
    }

    #[test]
    fn negative_shift() {
        let outcome = apply_rule(&rule(52, 50, 48), iv(79, 92));
        assert_eq!(outcome.matched, Some(iv(81, 94)));
        let outcome = apply_rule(&rule(0, 15, 37), iv(81, 94));
        assert_eq!(outcome.matched, None);
    }

    #[test]
    fn zero_length_rule_is_rejected() {
        assert!(RemapRule::new(1, 2, 0).is_none());
        assert_eq!(rule(5, 10, 3).source(), iv(10, 12));
        assert_eq!(rule(5, 10, 3).shift(), -5);
    }

    #[test]
    fn out_of_range_rules_are_rejected() {
        assert!(RemapRule::new(0, i64::MAX, 2).is_none());
        assert!(RemapRule::new(i64::MAX, 0, 2).is_none());
        assert!(RemapRule::new(i64::MAX, -2, 1).is_none());
        assert!(RemapRule::new(0, i64::MAX, 1).is_some());
    }

    #[test]
    fn rules_at_the_edges_of_i64() {
        let top = rule(0, i64::MAX - 1, 2);
        let outcome = apply_rule(&top, iv(i64::MAX - 5, i64::MAX));
        assert_eq!(outcome.matched, Some(iv(0, 1)));
        assert_eq!(outcome.unmatched, vec![iv(i64::MAX - 5, i64::MAX - 2)]);

        let bottom = rule(-10, i64::MIN, 3);
        let outcome = apply_rule(&bottom, iv(i64::MIN, i64::MIN + 4));
        assert_eq!(outcome.matched, Some(iv(-10, -8)));
        assert_eq!(outcome.unmatched, vec![iv(i64::MIN + 3, i64::MIN + 4)]);
    }

    #[test]
    fn overlapping_rules_are_rejected() {
        let err = Stage::new("seed-to-soil", vec![rule(0, 50, 10), rule(0, 0, 5), rule(0, 3, 1)])
            .unwrap_err();
        assert_eq!(
            err,
            OverlapError {
                stage: "seed-to-soil".to_string(),
                first: 1,
                second: 2,
            }
        );
        // Adjacent sources are fine
        assert!(Stage::new("x", vec![rule(0, 5, 5), rule(100, 0, 5)]).is_ok());
    }

    #[test]
    fn stage_passes_unclaimed_values_through() {
        let stage = stage(vec![rule(50, 98, 2), rule(52, 50, 48)]);
        let (matched, unclaimed) = split_by_rules(&stage, &[iv(0, 10), iv(95, 100)]);
        let mut matched = matched;
        matched.sort();
        assert_eq!(matched, vec![iv(50, 51), iv(97, 99)]);
        assert_eq!(unclaimed, vec![iv(0, 10), iv(100, 100)]);

        let mut outputs = apply_stage(&stage, &[iv(0, 10), iv(95, 100)]);
        outputs.sort();
        assert_eq!(outputs, vec![iv(0, 10), iv(50, 51), iv(97, 99), iv(100, 100)]);
    }

    #[test]
    fn empty_stage_is_identity() {
        let empty = stage(vec![]);
        let inputs = vec![iv(3, 9), iv(-4, 1), iv(100, 100)];
        assert_eq!(apply_stage(&empty, &inputs), inputs);
        let once = apply_stage(&stage(vec![rule(0, 5, 3)]), &inputs);
        assert_eq!(apply_stage(&empty, &once), once);
    }

    #[test]
    fn map_point_matches_lookup() {
        let stage = stage(vec![rule(50, 98, 2), rule(52, 50, 48)]);
        assert_eq!(stage.map_point(79), 81);
        assert_eq!(stage.map_point(14), 14);
        assert_eq!(stage.map_point(99), 51);
        assert_eq!(stage.map_point(100), 100);
    }

    #[test]
    fn pipeline_threads_stages() {
        let stages = vec![
            Stage::new("a", vec![rule(100, 0, 10)]).unwrap(),
            Stage::new("b", vec![rule(0, 105, 5)]).unwrap(),
        ];
        let mut outputs = run_pipeline(&stages, &[iv(0, 9)]);
        outputs.sort();
        assert_eq!(outputs, vec![iv(0, 4), iv(100, 104)]);
        assert_eq!(minimum_lower_bound(&outputs), Some(0));
        assert_eq!(run_pipeline(&[], &[iv(1, 2)]), vec![iv(1, 2)]);
    }

    #[test]
    fn minimum_of_nothing() {
        assert_eq!(minimum_lower_bound(&[]), None);
    }

    #[derive(Debug, Arbitrary)]
    struct RuleCase {
        #[proptest(strategy = "-500i64..500")]
        source_start: i64,
        #[proptest(strategy = "-500i64..500")]
        dest_start: i64,
        #[proptest(strategy = "1i64..200")]
        length: i64,
        #[proptest(strategy = "-500i64..500")]
        input_start: i64,
        #[proptest(strategy = "0i64..200")]
        input_extra: i64,
    }

    impl RuleCase {
        fn rule(&self) -> RemapRule {
            rule(self.dest_start, self.source_start, self.length)
        }

        fn input(&self) -> Interval {
            iv(self.input_start, self.input_start + self.input_extra)
        }
    }

    /// Rules with disjoint sources laid out left to right from zero.
    fn disjoint_rules() -> impl Strategy<Value = Vec<RemapRule>> {
        prop::collection::vec((0i64..20, 1i64..50, -1000i64..1000), 0..8).prop_map(|blocks| {
            let mut cursor = 0;
            blocks
                .into_iter()
                .map(|(gap, length, dest_start)| {
                    let source_start = cursor + gap;
                    cursor = source_start + length;
                    rule(dest_start, source_start, length)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn rule_partitions_input(case in any::<RuleCase>()) {
            let rule = case.rule();
            let input = case.input();
            let outcome = apply_rule(&rule, input);
            let mut pieces = outcome.unmatched.clone();
            pieces.extend(outcome.matched.map(|m| m.shift(-rule.shift())));
            pieces.sort();
            prop_assert!(pieces.len() <= 3);
            prop_assert_eq!(pieces.first().map(Interval::start), Some(input.start()));
            prop_assert_eq!(pieces.last().map(Interval::end), Some(input.end()));
            for pair in pieces.windows(2) {
                prop_assert_eq!(pair[0].end() + 1, pair[1].start());
            }
        }

        #[test]
        fn unmatched_never_touches_rule_source(case in any::<RuleCase>()) {
            let rule = case.rule();
            let outcome = apply_rule(&rule, case.input());
            for piece in outcome.unmatched {
                prop_assert!(piece.end() < rule.source_start() || piece.start() > rule.source_end());
            }
        }

        #[test]
        fn disjoint_input_is_untouched(case in any::<RuleCase>()) {
            let rule = case.rule();
            let input = iv(rule.source_end() + 1, rule.source_end() + 1 + case.input_extra);
            let outcome = apply_rule(&rule, input);
            prop_assert_eq!(outcome.matched, None);
            prop_assert_eq!(outcome.unmatched, vec![input]);
        }

        #[test]
        fn contained_input_is_fully_shifted(case in any::<RuleCase>()) {
            let rule = case.rule();
            let start = rule.source_start() + case.input_extra % rule.length();
            let input = iv(start, rule.source_end());
            let outcome = apply_rule(&rule, input);
            prop_assert_eq!(outcome.matched, Some(input.shift(rule.shift())));
            prop_assert!(outcome.unmatched.is_empty());
        }

        #[test]
        fn stage_preserves_total_length(
            rules in disjoint_rules(),
            start in -100i64..1000,
            extra in 0i64..500
        ) {
            let stage = Stage::new("prop", rules).unwrap();
            let input = iv(start, start + extra);
            let outputs = apply_stage(&stage, &[input]);
            let total: i64 = outputs.iter().map(Interval::len).sum();
            prop_assert_eq!(total, input.len());
        }

        #[test]
        fn stage_leaves_uncovered_input_alone(
            rules in disjoint_rules(),
            extra in 0i64..500
        ) {
            let stage = Stage::new("prop", rules).unwrap();
            // Sources never reach past 8 * (20 + 50)
            let input = iv(1000, 1000 + extra);
            prop_assert_eq!(apply_stage(&stage, &[input]), vec![input]);
        }

        #[test]
        fn map_point_agrees_with_interval_stage(
            rules in disjoint_rules(),
            value in -100i64..700
        ) {
            let stage = Stage::new("prop", rules).unwrap();
            let expected = stage
                .rules()
                .iter()
                .find(|rule| rule.source().contains(value))
                .map_or(value, |rule| value + rule.shift());
            prop_assert_eq!(stage.map_point(value), expected);
        }
    }
}
