#[cfg(test)]
mod tests {
    use crossbeam_channel::Receiver;

    use crate::config::Config;
    use crate::engine::GameStatus;
    use crate::multiplayer::MultiplayerGame;
    use crate::protocol::{ClientMessage, ScoreRecord};
    use crate::supply::SupplyError;
    use crate::tests::test_utils::{outbox, sent};
    use crate::timer::ManualTimer;

    fn new_game() -> (MultiplayerGame, Receiver<ClientMessage>) {
        let (sender, receiver) = outbox();
        let game = MultiplayerGame::new(&Config::default(), Box::new(ManualTimer::new()), sender);
        (game, receiver)
    }

    // Running game dealing dots, with `spare` extra pieces already queued
    fn running_game(spare: usize) -> (MultiplayerGame, Receiver<ClientMessage>) {
        let (mut game, receiver) = new_game();
        for _ in 0..2 + spare {
            game.handle_line("PIECE 3").unwrap();
        }
        game.start().unwrap();
        game.drain_events();
        sent(&receiver);
        (game, receiver)
    }

    #[test]
    fn test_new_requests_opening_pieces() {
        let (game, receiver) = new_game();
        assert_eq!(
            sent(&receiver),
            vec![ClientMessage::RequestPiece, ClientMessage::RequestPiece]
        );
        assert_eq!(game.game().status(), GameStatus::NotStarted);
    }

    #[test]
    fn test_start_waits_for_pieces() {
        let (mut game, receiver) = new_game();
        sent(&receiver);

        game.start().unwrap();
        assert_eq!(game.game().status(), GameStatus::NotStarted);

        game.handle_line("PIECE 3").unwrap();
        assert_eq!(game.game().status(), GameStatus::NotStarted);

        game.handle_line("PIECE 4").unwrap();
        assert_eq!(game.game().status(), GameStatus::Running);
        assert_eq!(game.game().current().unwrap().index(), 3);
        assert_eq!(game.game().following().unwrap().index(), 4);
        // Each opening draw asks for its replacement
        assert_eq!(
            sent(&receiver),
            vec![ClientMessage::RequestPiece, ClientMessage::RequestPiece]
        );
    }

    #[test]
    fn test_pieces_without_start_do_not_start() {
        let (mut game, _receiver) = new_game();
        game.handle_line("PIECE 3").unwrap();
        game.handle_line("PIECE 3").unwrap();
        assert_eq!(game.game().status(), GameStatus::NotStarted);

        game.start().unwrap();
        assert_eq!(game.game().status(), GameStatus::Running);
    }

    #[test]
    fn test_placement_reports_board_score_and_lives() {
        let (mut game, receiver) = running_game(1);

        assert!(game.attempt_place(1, 1).unwrap());
        let board = format!("{}4{}", "0".repeat(6), "0".repeat(18));
        assert_eq!(
            sent(&receiver),
            vec![
                ClientMessage::RequestPiece,
                ClientMessage::Board(board),
                ClientMessage::Score(0),
                ClientMessage::Lives(3),
            ]
        );
    }

    #[test]
    fn test_failed_placement_sends_nothing() {
        let (mut game, receiver) = running_game(1);
        assert!(game.attempt_place(1, 1).unwrap());
        sent(&receiver);

        assert!(!game.attempt_place(1, 1).unwrap());
        assert!(sent(&receiver).is_empty());
    }

    #[test]
    fn test_placement_before_piece_arrives_is_starved() {
        let (mut game, receiver) = running_game(0);

        assert_eq!(game.attempt_place(1, 1), Err(SupplyError::Starved));
        assert!(sent(&receiver).is_empty());
        assert_eq!(game.board_snapshot(), "0".repeat(25));
    }

    #[test]
    fn test_malformed_lines_are_ignored() {
        let (mut game, receiver) = running_game(0);
        let queued = game.game().supply().queued();

        game.handle_line("PIECE 99").unwrap();
        game.handle_line("WHAT is this").unwrap();
        game.handle_line("").unwrap();
        game.handle_line("SCORES").unwrap();

        assert_eq!(game.game().supply().queued(), queued);
        assert!(game.leaderboard().scores().is_empty());
        assert!(sent(&receiver).is_empty());
    }

    #[test]
    fn test_scores_update_leaderboard() {
        let (mut game, _receiver) = running_game(0);
        game.handle_line("SCORES alice:120:2\nbob:40:DEAD").unwrap();

        assert_eq!(game.leaderboard().score_of("alice"), Some(120));
        assert!(game.leaderboard().is_eliminated("bob"));
    }

    #[test]
    fn test_bad_score_record_keeps_the_rest() {
        let (mut game, _receiver) = running_game(0);
        game.handle_line("SCORES alice:120:2\nbob:40:DEAD\ncarol:oops:3")
            .unwrap();

        assert_eq!(game.leaderboard().score_of("alice"), Some(120));
        assert_eq!(game.leaderboard().score_of("bob"), Some(40));
        assert_eq!(game.leaderboard().score_of("carol"), None);
        assert!(game.leaderboard().is_eliminated("bob"));
    }

    #[test]
    fn test_high_scores_are_sorted() {
        let (mut game, _receiver) = running_game(0);
        game.handle_line("HISCORES ben:300\nann:900").unwrap();

        assert_eq!(
            game.online_high_scores(),
            &[ScoreRecord::new("ann", 900), ScoreRecord::new("ben", 300)]
        );
    }

    #[test]
    fn test_chat_is_logged() {
        let (mut game, receiver) = running_game(0);
        game.handle_line("MSG good luck").unwrap();
        game.send_chat("thanks");

        assert_eq!(game.chat_log(), &["good luck".to_string()]);
        assert_eq!(sent(&receiver), vec![ClientMessage::Chat("thanks".to_string())]);
    }

    #[test]
    fn test_missed_turns_report_lives_then_quit() {
        let (mut game, receiver) = running_game(2);

        assert!(game.game_loop_tick().unwrap());
        assert!(game.game_loop_tick().unwrap());
        // The last life goes without drawing a piece
        assert!(game.game_loop_tick().unwrap());

        assert_eq!(
            sent(&receiver),
            vec![
                ClientMessage::RequestPiece,
                ClientMessage::Lives(2),
                ClientMessage::RequestPiece,
                ClientMessage::Lives(1),
                ClientMessage::Lives(0),
                ClientMessage::Quit,
            ]
        );
        assert!(game.game().is_over());
        assert!(game.is_detached());
    }

    #[test]
    fn test_stale_timer_expiry_sends_nothing() {
        let (mut game, receiver) = running_game(1);
        let stale = game.game().timer_generation();
        assert!(game.attempt_place(1, 1).unwrap());
        sent(&receiver);

        assert!(!game.on_timer_expired(stale).unwrap());
        assert!(sent(&receiver).is_empty());
        assert_eq!(game.game().lives(), 3);
    }

    #[test]
    fn test_shutdown_quits_once() {
        let (mut game, receiver) = running_game(0);

        game.shutdown();
        game.shutdown();
        assert_eq!(sent(&receiver), vec![ClientMessage::Quit]);
        assert!(game.game().is_over());
    }

    #[test]
    fn test_detached_game_ignores_pieces() {
        let (mut game, receiver) = running_game(0);
        game.shutdown();
        sent(&receiver);
        let queued = game.game().supply().queued();

        game.handle_line("PIECE 3").unwrap();
        game.handle_line("SCORES alice:1:3").unwrap();
        assert_eq!(game.game().supply().queued(), queued);
        assert!(game.leaderboard().scores().is_empty());

        // The score screen still receives the online table
        game.handle_line("HISCORES ann:900").unwrap();
        assert_eq!(game.online_high_scores().len(), 1);
    }

    #[test]
    fn test_skip_requests_a_piece() {
        let (mut game, receiver) = running_game(1);

        assert!(game.use_skip().unwrap());
        assert_eq!(game.game().skips(), 2);
        assert_eq!(sent(&receiver), vec![ClientMessage::RequestPiece]);
    }

    #[test]
    fn test_score_screen_requests() {
        let (mut game, receiver) = running_game(0);
        game.game_mut().stats_mut().score = 730;

        game.poll_scores();
        game.request_high_scores();
        game.submit_high_score("ann");
        assert_eq!(
            sent(&receiver),
            vec![
                ClientMessage::RequestScores,
                ClientMessage::RequestHighScores,
                ClientMessage::HighScore(ScoreRecord::new("ann", 730)),
            ]
        );
    }
}
