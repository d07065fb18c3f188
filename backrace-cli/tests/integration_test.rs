//! Integration tests for the backrace engine
//!
//! Tests the full stack: rules, move resolution, strategies, game loop and
//! match play

use backrace_core::{
    plan_turn, Board, Colour, DiceRoll, EvalWeights, FurthestBack, Game, GameConfig, GameResult, OpponentActivity,
    Strategy, StrategyKind, Turn,
};
use backrace_tournament::{play_match, GameRunner, MatchConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn pip_count(board: &Board, colour: Colour) -> u32 {
    board.pieces(colour).map(|p| p.spaces_to_home() as u32).sum()
}

// ============================================================================
// OPENING MOVES
// ============================================================================

#[test]
fn test_opening_six_five_furthest_back() {
    let mut board = Board::starting();
    let before = pip_count(&board, Colour::White);

    let mut strategy = FurthestBack::default();
    let mut turn = Turn::new(&mut board, Colour::White, DiceRoll::new(6, 5).unwrap());
    strategy
        .play_turn(&mut turn, &OpponentActivity::default())
        .unwrap();
    let moves = turn.into_moves();

    let mut dice: Vec<u8> = moves.iter().map(|m| m.die).collect();
    dice.sort();
    assert_eq!(dice, vec![5, 6]);
    assert_eq!(before - pip_count(&board, Colour::White), 11);
    assert_eq!(board.piece_count(Colour::White), 15);
    assert_eq!(board.piece_count(Colour::Black), 15);
}

#[test]
fn test_opening_plan_is_replayable() {
    let board = Board::starting();
    let plan = plan_turn(&board, Colour::Black, &[6, 5], &EvalWeights::default());
    assert_eq!(plan.moves.len(), 2);

    let mut copy = board.create_copy();
    for mv in &plan.moves {
        let piece = *copy.piece_at(mv.location).unwrap();
        copy.move_piece(&piece, mv.die).unwrap();
    }
    assert_eq!(pip_count(&board, Colour::Black) - pip_count(&copy, Colour::Black), 11);
}

#[test]
fn test_every_opening_roll_is_fully_played() {
    for a in 1..=6u8 {
        for b in (a + 1)..=6u8 {
            let mut board = Board::starting();
            let mut strategy = StrategyKind::furthest_back();
            let mut turn = Turn::new(&mut board, Colour::White, DiceRoll::new(a, b).unwrap());
            strategy
                .play_turn(&mut turn, &OpponentActivity::default())
                .unwrap();
            assert!(turn.remaining_dice().is_empty(), "roll {}-{} left dice", a, b);
        }
    }
}

// ============================================================================
// FULL GAMES
// ============================================================================

#[test]
fn test_all_strategy_pairs_finish() {
    let kinds = [
        StrategyKind::furthest_back(),
        StrategyKind::random(1),
        StrategyKind::look_ahead(),
        StrategyKind::mostly_smart(2),
    ];
    for (i, white) in kinds.iter().enumerate() {
        for (j, black) in kinds.iter().enumerate() {
            let mut runner = GameRunner::new(white, black, (i * 4 + j) as u64);
            let outcome = runner.play_game(Colour::White);
            assert_ne!(outcome.result, GameResult::Undecided, "{} vs {}", i, j);
        }
    }
}

#[test]
fn test_finished_board_has_one_empty_side() {
    let mut game = Game::new(Colour::Black, GameConfig::default().with_seed(77));
    let mut white = StrategyKind::look_ahead();
    let mut black = StrategyKind::furthest_back();
    let outcome = game.run(&mut white, &mut black);

    let winner = outcome.winner().unwrap();
    assert_eq!(game.board().piece_count(winner), 0);
    assert!(game.board().piece_count(winner.opponent()) > 0);
}

#[test]
fn test_game_never_gains_pieces() {
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    let seed: u64 = rng.gen();
    let mut game = Game::new(Colour::White, GameConfig::default().with_seed(seed));
    let mut white = StrategyKind::random(3);
    let mut black = StrategyKind::random(4);
    let mut previous = (15, 15);
    game.run_with(&mut white, &mut black, |_, _, board| {
        let now = (board.piece_count(Colour::White), board.piece_count(Colour::Black));
        assert!(now.0 <= previous.0 && now.1 <= previous.1);
        previous = now;
    });
}

// ============================================================================
// MATCH PLAY
// ============================================================================

#[test]
fn test_small_match_totals() {
    let config = MatchConfig::new(10).with_seed(2024);
    let result = play_match(&StrategyKind::furthest_back(), &StrategyKind::furthest_back(), &config);
    assert_eq!(result.games_played, 10);
    assert_eq!(result.white_wins + result.black_wins + result.undecided, 10);
    assert_eq!(result.undecided, 0);
}

#[test]
#[ignore = "statistical check over many full games; run with --ignored"]
fn test_identical_strategies_split_evenly() {
    let config = MatchConfig::new(400).with_seed(99);
    let result = play_match(&StrategyKind::furthest_back(), &StrategyKind::furthest_back(), &config);
    let rate = result.white_win_rate();
    assert!(rate > 0.4 && rate < 0.6, "white win rate {}", rate);
}

#[test]
#[ignore = "statistical check over many full games; run with --ignored"]
fn test_search_beats_random() {
    let config = MatchConfig::new(200).with_seed(5);
    let result = play_match(&StrategyKind::furthest_back(), &StrategyKind::random(8), &config);
    assert!(result.white_win_rate() > 0.7, "furthest-back won {}", result.white_win_rate());
}
