use assert_float_eq::*;

use super::*;

#[test]
fn hold_prob_extremes() {
    assert_eq!(0.0, hold_prob(0.0));
    assert_eq!(1.0, hold_prob(1.0));
    assert_float_absolute_eq!(0.5, hold_prob(0.5), 1e-12);
}

#[test]
fn hold_prob_known_values() {
    // standard tabulated values for the i.i.d. point model
    assert_float_absolute_eq!(0.7357, hold_prob(0.6), 1e-4);
    assert_float_absolute_eq!(0.9008, hold_prob(0.7), 1e-4);
}

#[test]
fn hold_prob_agrees_with_race() {
    for p in [0.1, 0.35, 0.5, 0.62, 0.9] {
        let race = race(4, |_| p);
        let from_race = race.p1_terminal() + race.deuce * deuce_win(p * p, (1.0 - p) * (1.0 - p));
        assert_float_absolute_eq!(hold_prob(p), from_race, 1e-12);
    }
}

#[test]
fn race_mass_is_conserved() {
    let race = race(7, |n| if n % 3 == 0 { 0.3 } else { 0.7 });
    let total: f64 = race.terminals.iter().map(|(_, prob)| prob).sum::<f64>() + race.deuce;
    assert_float_absolute_eq!(1.0, total, 1e-12);
}

#[test]
fn tiebreak_symmetric_players() {
    for first_server in [Player::P1, Player::P2] {
        assert_float_absolute_eq!(0.5, tiebreak_prob(0.6, 0.6, 7, first_server), 1e-12);
        assert_float_absolute_eq!(0.5, tiebreak_prob(0.6, 0.6, 10, first_server), 1e-12);
    }
}

#[test]
fn tiebreak_complementarity() {
    let p1 = tiebreak_prob(0.66, 0.61, 7, Player::P1);
    let p2 = tiebreak_prob(0.61, 0.66, 7, Player::P2);
    assert_float_absolute_eq!(1.0, p1 + p2, 1e-12);
    assert!(p1 > 0.5);
}

#[test]
fn tiebreak_first_server_is_irrelevant() {
    // a well-known property of the 1–2–2 rotation under i.i.d. points
    let opened_by_p1 = tiebreak_prob(0.7, 0.55, 7, Player::P1);
    let opened_by_p2 = tiebreak_prob(0.7, 0.55, 7, Player::P2);
    assert_float_absolute_eq!(opened_by_p1, opened_by_p2, 1e-9);
}

#[test]
fn set_probs_sum_to_one() {
    for policy in [TiebreakPolicy::Standard, TiebreakPolicy::Super, TiebreakPolicy::None] {
        for first_server in [Player::P1, Player::P2] {
            let probs = set_probs(0.64, 0.59, first_server, policy);
            assert_float_absolute_eq!(1.0, probs.p1_win() + probs.p2_win(), 1e-12);
            assert!(probs.p1_win() > 0.5, "{probs:?}");
        }
    }
}

#[test]
fn advantage_set_never_ends_odd() {
    let probs = set_probs(0.64, 0.62, Player::P1, TiebreakPolicy::None);
    let standard = set_probs(0.64, 0.62, Player::P1, TiebreakPolicy::Standard);
    // odd totals can only come from 6–1, 6–3 or the 7–6 tiebreak, which advantage sets lack
    assert!(probs.p1_odd < standard.p1_odd);
    assert!(probs.p2_odd < standard.p2_odd);
}

#[test]
fn symmetric_match_is_even() {
    for format in [MatchFormat::best_of_three(), MatchFormat::best_of_five()] {
        assert_float_absolute_eq!(0.5, match_prob(0.63, 0.63, &format), 1e-12);
    }
}

#[test]
fn match_complementarity() {
    let format = MatchFormat::best_of_five().with_final_set(TiebreakPolicy::Super);
    let p1 = match_prob(0.67, 0.62, &format);
    let p2 = match_prob(0.62, 0.67, &format);
    assert_float_absolute_eq!(1.0, p1 + p2, 1e-12);
}

#[test]
fn longer_matches_favour_the_stronger_player() {
    let best_of_one = MatchFormat {
        best_of: 1,
        ..MatchFormat::default()
    };
    let bo1 = match_prob(0.64, 0.62, &best_of_one);
    let bo3 = match_prob(0.64, 0.62, &MatchFormat::best_of_three());
    let bo5 = match_prob(0.64, 0.62, &MatchFormat::best_of_five());
    assert!(0.5 < bo1 && bo1 < bo3 && bo3 < bo5, "{bo1} {bo3} {bo5}");
}

#[test]
fn best_of_one_is_a_single_set() {
    let best_of_one = MatchFormat {
        best_of: 1,
        ..MatchFormat::default()
    };
    let expected = 0.5 * set_probs(0.66, 0.6, Player::P1, TiebreakPolicy::Standard).p1_win()
        + 0.5 * set_probs(0.66, 0.6, Player::P2, TiebreakPolicy::Standard).p1_win();
    assert_float_absolute_eq!(expected, match_prob(0.66, 0.6, &best_of_one), 1e-12);
}

#[test]
fn serve_point_prob_collapses_branches() {
    let server = ServeProfile {
        first_serve_in: 0.60,
        first_serve_win: 0.75,
        second_serve_win: 0.50,
        ace: 0.08,
        double_fault: 0.03,
    };
    let expected = 0.08 + 0.52 * 0.75 + 0.37 * 0.50;
    assert_float_absolute_eq!(
        expected,
        serve_point_prob(&server, None, &AdjustmentConfig::default()),
        1e-12
    );
}

#[test]
fn serve_point_prob_applies_adjustment() {
    let server = ServeProfile {
        first_serve_in: 1.0,
        first_serve_win: 0.70,
        second_serve_win: 0.50,
        ace: 0.0,
        double_fault: 0.0,
    };
    let returner = ReturnProfile {
        vs_first_serve: Some(0.40),
        vs_second_serve: None,
    };
    assert_float_absolute_eq!(
        0.65,
        serve_point_prob(&server, Some(&returner), &AdjustmentConfig::default()),
        1e-12
    );
    assert_float_absolute_eq!(
        0.70,
        serve_point_prob(&server, Some(&returner), &AdjustmentConfig::disabled()),
        1e-12
    );
}
