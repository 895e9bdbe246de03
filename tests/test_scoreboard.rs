use alien_invasion::compute::init_session;
use alien_invasion::scoreboard::{format_score, Scoreboard};
use alien_invasion::settings::Settings;

#[test]
fn score_rounds_to_nearest_ten() {
    assert_eq!(format_score(0), "0");
    assert_eq!(format_score(4), "0");
    assert_eq!(format_score(5), "10");
    assert_eq!(format_score(50), "50");
    assert_eq!(format_score(994), "990");
}

#[test]
fn score_groups_thousands() {
    assert_eq!(format_score(1234), "1,230");
    assert_eq!(format_score(12_345), "12,350");
    assert_eq!(format_score(999_995), "1,000,000");
    assert_eq!(format_score(u32::MAX), "4,294,967,300");
}

#[test]
fn board_reflects_stats() {
    let mut s = init_session(Settings::default());
    s.stats.score = 1234;
    s.stats.high_score = 5000;
    s.stats.level = 3;
    s.stats.wave = 2;
    s.stats.ships_left = 2;

    let board = Scoreboard::from_session(&s);

    assert_eq!(board.score, "1,230");
    assert_eq!(board.high_score, "5,000");
    assert_eq!(board.level, "3");
    assert_eq!(board.wave, "2");
    assert_eq!(board.lives, 2);
}
