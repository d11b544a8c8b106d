//! Round flow integration tests.

use bjengine::{
    Action, Bet, Card, Game, GameRules, HandId, HandOutcome, HandStatus, IllegalAction, Phase,
    PhaseEvent, ROUND_RESERVE, Rank, RoundError, Shoe, ShoeConfig, SideBetKind, Suit, TableConfig,
    TableLimits,
};

const fn card(suit: Suit, rank: Rank) -> Card {
    Card::new(suit, rank)
}

/// Cards nobody should reach, so a round never runs the shoe dry by accident.
fn filler() -> Vec<Card> {
    vec![card(Suit::Clubs, Rank::Two); 10]
}

/// A game whose shoe deals `draws` in order: player, dealer up, player,
/// dealer hole, then every later draw.
fn stacked_game(rules: GameRules, draws: &[Card]) -> Game {
    let config = TableConfig {
        rules,
        ..TableConfig::default()
    };
    let mut game = Game::new(config, 7).unwrap().with_balance(1_000);
    let mut cards = draws.to_vec();
    cards.extend(filler());
    game.replace_shoe(Shoe::from_cards(cards)).unwrap();
    game
}

fn player_hand(game: &Game) -> HandId {
    game.current_hand().expect("a hand should be waiting")
}

#[test]
fn blackjack_pays_three_to_two() {
    let mut game = stacked_game(
        GameRules::default(),
        &[
            card(Suit::Spades, Rank::Ace),
            card(Suit::Hearts, Rank::Nine),
            card(Suit::Spades, Rank::King),
            card(Suit::Clubs, Rank::Seven),
        ],
    );

    let snapshot = game.place_bet(Bet::new(100)).unwrap();
    assert_eq!(snapshot.phase, Phase::Completed);

    let result = game.last_result().unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Blackjack);
    assert_eq!(result.hands[0].delta, 150);
    assert_eq!(result.dealer_value, 18);
    assert_eq!(game.balance(), 1_150);
}

#[test]
fn six_to_five_blackjack_rounds_down() {
    let mut game = stacked_game(
        GameRules::default().with_blackjack_pays(1.2),
        &[
            card(Suit::Spades, Rank::Ace),
            card(Suit::Hearts, Rank::Nine),
            card(Suit::Spades, Rank::Queen),
            card(Suit::Clubs, Rank::Seven),
        ],
    );

    game.place_bet(Bet::new(15)).unwrap();
    assert_eq!(game.last_result().unwrap().hands[0].delta, 18);
    assert_eq!(game.balance(), 1_018);
}

#[test]
fn equal_totals_push() {
    let mut game = stacked_game(
        GameRules::default(),
        &[
            card(Suit::Spades, Rank::King),
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Queen),
            card(Suit::Diamonds, Rank::Queen),
        ],
    );

    game.place_bet(Bet::new(100)).unwrap();
    let hand = player_hand(&game);
    let snapshot = game.submit_action(hand, Action::Stand).unwrap();

    assert_eq!(snapshot.phase, Phase::Completed);
    let result = game.last_result().unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Push);
    assert_eq!(result.hands[0].delta, 0);
    assert_eq!(game.balance(), 1_000);
}

#[test]
fn player_bust_loses_without_dealer_drawing() {
    let mut game = stacked_game(
        GameRules::default(),
        &[
            card(Suit::Spades, Rank::Ten),
            card(Suit::Hearts, Rank::Nine),
            card(Suit::Clubs, Rank::Six),
            card(Suit::Diamonds, Rank::Six),
            card(Suit::Hearts, Rank::Ten),
        ],
    );

    game.place_bet(Bet::new(100)).unwrap();
    let hand = player_hand(&game);
    game.submit_action(hand, Action::Hit).unwrap();

    let result = game.last_result().unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Lose);
    assert_eq!(result.hands[0].delta, -100);
    assert_eq!(result.dealer_value, 15);
    assert_eq!(game.balance(), 900);
}

#[test]
fn dealer_soft_17_rule_changes_the_outcome() {
    let draws = [
        card(Suit::Spades, Rank::Ten),
        card(Suit::Hearts, Rank::Ace),
        card(Suit::Clubs, Rank::Eight),
        card(Suit::Diamonds, Rank::Six),
        card(Suit::Hearts, Rank::Two),
    ];

    let mut stands = stacked_game(GameRules::default(), &draws);
    stands.place_bet(Bet::new(100)).unwrap();
    let hand = player_hand(&stands);
    stands.submit_action(hand, Action::Stand).unwrap();
    let result = stands.last_result().unwrap();
    assert_eq!(result.dealer_value, 17);
    assert_eq!(result.hands[0].outcome, HandOutcome::Win);

    let mut hits = stacked_game(GameRules::default().with_dealer_hits_soft_17(true), &draws);
    hits.place_bet(Bet::new(100)).unwrap();
    let hand = player_hand(&hits);
    hits.submit_action(hand, Action::Stand).unwrap();
    let result = hits.last_result().unwrap();
    assert_eq!(result.dealer_value, 19);
    assert_eq!(result.hands[0].outcome, HandOutcome::Lose);
}

#[test]
fn double_down_draws_one_card_and_doubles_the_bet() {
    let mut game = stacked_game(
        GameRules::default(),
        &[
            card(Suit::Spades, Rank::Five),
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Six),
            card(Suit::Diamonds, Rank::Seven),
            card(Suit::Hearts, Rank::King),
        ],
    );

    game.place_bet(Bet::new(100)).unwrap();
    let hand = player_hand(&game);
    assert!(game.legal_actions(hand).contains(&Action::Double));
    game.submit_action(hand, Action::Double).unwrap();

    let result = game.last_result().unwrap();
    assert_eq!(result.hands[0].bet, 200);
    assert_eq!(result.hands[0].player_value, 21);
    assert_eq!(result.hands[0].delta, 200);
    assert_eq!(game.balance(), 1_200);
}

#[test]
fn double_rejected_outside_the_allowed_totals() {
    let mut game = stacked_game(
        GameRules::default().with_double(bjengine::DoubleOption::NineOrTen),
        &[
            card(Suit::Spades, Rank::Five),
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Six),
            card(Suit::Diamonds, Rank::Seven),
        ],
    );

    game.place_bet(Bet::new(100)).unwrap();
    let hand = player_hand(&game);
    assert!(!game.legal_actions(hand).contains(&Action::Double));
    assert_eq!(
        game.submit_action(hand, Action::Double),
        Err(RoundError::IllegalAction(IllegalAction::CannotDouble))
    );
    assert_eq!(game.balance(), 900);
}

#[test]
fn surrender_returns_half_the_bet() {
    let mut game = stacked_game(
        GameRules::default(),
        &[
            card(Suit::Spades, Rank::Ten),
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Six),
            card(Suit::Diamonds, Rank::Seven),
        ],
    );

    game.place_bet(Bet::new(100)).unwrap();
    let hand = player_hand(&game);
    game.submit_action(hand, Action::Surrender).unwrap();

    let result = game.last_result().unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Surrendered);
    assert_eq!(result.hands[0].delta, -50);
    assert_eq!(game.balance(), 950);
}

#[test]
fn split_eights_twice_then_play_every_hand() {
    let mut game = stacked_game(
        GameRules::default().with_max_splits(4),
        &[
            card(Suit::Spades, Rank::Eight),
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Eight),
            card(Suit::Diamonds, Rank::Seven),
            // First split.
            card(Suit::Hearts, Rank::Eight),
            card(Suit::Clubs, Rank::Three),
            // Second split.
            card(Suit::Spades, Rank::Ten),
            card(Suit::Clubs, Rank::Ten),
            // Hit on the eight-three.
            card(Suit::Diamonds, Rank::Ten),
        ],
    );

    game.place_bet(Bet::new(100)).unwrap();
    let origin = player_hand(&game);
    game.submit_action(origin, Action::Split).unwrap();
    assert_eq!(game.hands().len(), 2);
    assert_eq!(game.hand(origin).unwrap().status(), HandStatus::SplitOrigin);
    assert_eq!(game.balance(), 800);

    let first = player_hand(&game);
    let second = game.hands()[1].id();
    assert_eq!(
        game.submit_action(second, Action::Hit),
        Err(RoundError::IllegalAction(IllegalAction::NotYourTurn))
    );
    assert_eq!(
        game.submit_action(origin, Action::Hit),
        Err(RoundError::IllegalAction(IllegalAction::HandNotActive))
    );
    assert_eq!(
        game.submit_action(HandId(99), Action::Hit),
        Err(RoundError::IllegalAction(IllegalAction::HandNotFound))
    );

    game.submit_action(first, Action::Split).unwrap();
    assert_eq!(game.hands().len(), 3);
    assert_eq!(game.balance(), 700);
    assert!(game.hands().iter().all(|h| h.splits_so_far() >= 1));

    let ids: Vec<HandId> = game.hands().iter().map(|h| h.id()).collect();
    assert_eq!(ids[2], second);
    game.submit_action(ids[0], Action::Stand).unwrap();
    game.submit_action(ids[1], Action::Stand).unwrap();
    let snapshot = game.submit_action(second, Action::Hit).unwrap();

    assert_eq!(snapshot.phase, Phase::Completed);
    let result = game.last_result().unwrap();
    assert_eq!(result.hands.len(), 3);
    assert!(result.hands.iter().all(|h| h.outcome == HandOutcome::Win));
    assert_eq!(result.net, 300);
    assert_eq!(game.balance(), 1_300);
}

#[test]
fn split_limit_is_enforced() {
    let mut game = stacked_game(
        GameRules::default().with_max_splits(2),
        &[
            card(Suit::Spades, Rank::Eight),
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Eight),
            card(Suit::Diamonds, Rank::Seven),
            // First split: both children are pairs again.
            card(Suit::Hearts, Rank::Eight),
            card(Suit::Diamonds, Rank::Eight),
            // Second split, on the first child.
            card(Suit::Spades, Rank::Eight),
            card(Suit::Diamonds, Rank::Three),
            // Third split, on the sibling.
            card(Suit::Spades, Rank::Ten),
            card(Suit::Clubs, Rank::Ten),
        ],
    );

    game.place_bet(Bet::new(100)).unwrap();
    game.submit_action(player_hand(&game), Action::Split).unwrap();
    let [first, sibling] = [game.hands()[0].id(), game.hands()[1].id()];
    assert!(game.hand(sibling).unwrap().is_pair());

    game.submit_action(first, Action::Split).unwrap();
    let deepest = player_hand(&game);
    let hand = game.hand(deepest).unwrap();
    assert!(hand.is_pair());
    assert_eq!(hand.splits_so_far(), 2);
    assert!(!game.legal_actions(deepest).contains(&Action::Split));
    assert_eq!(
        game.submit_action(deepest, Action::Split),
        Err(RoundError::IllegalAction(IllegalAction::MaxSplitsReached))
    );
    game.submit_action(deepest, Action::Stand).unwrap();
    game.submit_action(player_hand(&game), Action::Stand).unwrap();

    // The sibling was split once, so it may split again.
    assert_eq!(player_hand(&game), sibling);
    assert_eq!(game.hand(sibling).unwrap().splits_so_far(), 1);
    assert!(game.legal_actions(sibling).contains(&Action::Split));
    game.submit_action(sibling, Action::Split).unwrap();
    assert_eq!(game.hands().len(), 4);
    assert_eq!(game.balance(), 600);

    while let Some(hand) = game.current_hand() {
        game.submit_action(hand, Action::Stand).unwrap();
    }
    let result = game.last_result().unwrap();
    let outcomes: Vec<HandOutcome> = result.hands.iter().map(|h| h.outcome).collect();
    assert_eq!(
        outcomes,
        vec![HandOutcome::Lose, HandOutcome::Lose, HandOutcome::Win, HandOutcome::Win]
    );
    assert_eq!(result.net, 0);
    assert_eq!(game.balance(), 1_000);
}

#[test]
fn split_aces_take_one_card_and_stand() {
    let mut game = stacked_game(
        GameRules::default(),
        &[
            card(Suit::Spades, Rank::Ace),
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Hearts, Rank::Ace),
            card(Suit::Diamonds, Rank::Seven),
            card(Suit::Clubs, Rank::Five),
            card(Suit::Diamonds, Rank::King),
        ],
    );

    game.place_bet(Bet::new(100)).unwrap();
    let origin = player_hand(&game);
    let snapshot = game.submit_action(origin, Action::Split).unwrap();

    assert_eq!(snapshot.phase, Phase::Completed);
    let result = game.last_result().unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Lose);
    // A split ace and a ten is 21, not a blackjack.
    assert_eq!(result.hands[1].outcome, HandOutcome::Win);
    assert_eq!(result.hands[1].delta, 100);
    assert_eq!(game.balance(), 1_000);
}

#[test]
fn insurance_pays_two_to_one_against_dealer_blackjack() {
    let mut game = stacked_game(
        GameRules::default(),
        &[
            card(Suit::Spades, Rank::Ten),
            card(Suit::Hearts, Rank::Ace),
            card(Suit::Clubs, Rank::Nine),
            card(Suit::Diamonds, Rank::King),
        ],
    );

    game.place_bet(Bet::new(100)).unwrap();
    assert!(game.insurance_offered());
    assert_eq!(
        game.take_insurance(51),
        Err(RoundError::IllegalAction(IllegalAction::InsuranceTooLarge))
    );

    let snapshot = game.take_insurance(50).unwrap();
    assert_eq!(snapshot.insurance, Some(50));
    assert_eq!(game.balance(), 850);
    assert_eq!(
        game.decline_insurance(),
        Err(RoundError::IllegalAction(IllegalAction::InsuranceAlreadyDecided))
    );

    let hand = player_hand(&game);
    game.submit_action(hand, Action::Stand).unwrap();

    let result = game.last_result().unwrap();
    assert!(result.dealer_blackjack);
    assert_eq!(result.insurance.unwrap().delta, 100);
    assert_eq!(result.hands[0].delta, -100);
    assert_eq!(result.net, 0);
    assert_eq!(game.balance(), 1_000);
}

#[test]
fn insurance_only_before_the_first_action_with_an_ace_up() {
    let mut game = stacked_game(
        GameRules::default(),
        &[
            card(Suit::Spades, Rank::Five),
            card(Suit::Hearts, Rank::Ace),
            card(Suit::Clubs, Rank::Four),
            card(Suit::Diamonds, Rank::Six),
            card(Suit::Diamonds, Rank::Two),
        ],
    );

    game.place_bet(Bet::new(100)).unwrap();
    let hand = player_hand(&game);
    game.submit_action(hand, Action::Hit).unwrap();
    assert!(!game.insurance_offered());
    assert_eq!(
        game.take_insurance(10),
        Err(RoundError::IllegalAction(IllegalAction::InsuranceNotOffered))
    );

    let mut no_ace = stacked_game(
        GameRules::default(),
        &[
            card(Suit::Spades, Rank::Five),
            card(Suit::Hearts, Rank::Nine),
            card(Suit::Clubs, Rank::Four),
            card(Suit::Diamonds, Rank::Six),
        ],
    );
    no_ace.place_bet(Bet::new(100)).unwrap();
    assert_eq!(
        no_ace.decline_insurance(),
        Err(RoundError::IllegalAction(IllegalAction::InsuranceNotOffered))
    );
}

#[test]
fn side_bets_settle_on_the_first_two_cards() {
    let mut game = stacked_game(
        GameRules::default(),
        &[
            card(Suit::Spades, Rank::Eight),
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Hearts, Rank::Eight),
            card(Suit::Diamonds, Rank::Nine),
        ],
    );

    let bet = Bet::new(100)
        .with_side_bet(SideBetKind::PerfectPairs, 10)
        .with_side_bet(SideBetKind::RoyalMatch, 10);
    let snapshot = game.place_bet(bet).unwrap();
    assert_eq!(snapshot.balance, 880);
    assert_eq!(snapshot.side_bets.len(), 2);

    let hand = player_hand(&game);
    game.submit_action(hand, Action::Stand).unwrap();

    let result = game.last_result().unwrap();
    assert_eq!(result.side_bets[0].kind, SideBetKind::PerfectPairs);
    assert_eq!(result.side_bets[0].delta, 50);
    assert_eq!(result.side_bets[1].kind, SideBetKind::RoyalMatch);
    assert_eq!(result.side_bets[1].delta, -10);
    assert_eq!(result.hands[0].delta, -100);
    assert_eq!(result.net, -60);
    assert_eq!(game.balance(), 940);
}

#[test]
fn bet_validation_leaves_the_game_untouched() {
    let config = TableConfig {
        limits: TableLimits::new(10, 500).with_max_side_bet(25),
        ..TableConfig::default()
    };
    let mut game = Game::new(config, 1).unwrap().with_balance(300);
    let before = game.shoe().remaining();

    assert_eq!(
        game.place_bet(Bet::new(5)),
        Err(RoundError::IllegalAction(IllegalAction::BetOutOfRange))
    );
    assert_eq!(
        game.place_bet(Bet::new(600)),
        Err(RoundError::IllegalAction(IllegalAction::BetOutOfRange))
    );
    assert_eq!(
        game.place_bet(Bet::new(100).with_side_bet(SideBetKind::LuckyLadies, 26)),
        Err(RoundError::IllegalAction(IllegalAction::SideBetOutOfRange))
    );
    assert_eq!(
        game.place_bet(
            Bet::new(100)
                .with_side_bet(SideBetKind::LuckyLadies, 5)
                .with_side_bet(SideBetKind::LuckyLadies, 5)
        ),
        Err(RoundError::IllegalAction(IllegalAction::DuplicateSideBet))
    );
    assert_eq!(
        game.place_bet(Bet::new(400)),
        Err(RoundError::InsufficientBalance)
    );

    assert_eq!(game.phase(), Phase::Betting);
    assert_eq!(game.balance(), 300);
    assert_eq!(game.shoe().remaining(), before);
}

#[test]
fn actions_outside_the_player_turn_are_rejected() {
    let mut game = Game::new(TableConfig::default(), 3).unwrap().with_balance(100);
    assert_eq!(
        game.submit_action(HandId(0), Action::Hit),
        Err(RoundError::IllegalAction(IllegalAction::WrongPhase))
    );
    assert_eq!(
        game.next_round(),
        Err(RoundError::IllegalAction(IllegalAction::WrongPhase))
    );
    assert!(game.legal_actions(HandId(0)).is_empty());
    assert!(game.drain_events().is_empty());
}

#[test]
fn empty_shoe_rolls_back_the_action() {
    let config = TableConfig::default();
    let mut game = Game::new(config, 9).unwrap().with_balance(1_000);
    game.replace_shoe(Shoe::from_cards(vec![
        card(Suit::Spades, Rank::Ten),
        card(Suit::Hearts, Rank::Nine),
        card(Suit::Clubs, Rank::Six),
        card(Suit::Diamonds, Rank::Eight),
    ]))
    .unwrap();

    game.place_bet(Bet::new(100)).unwrap();
    let hand = player_hand(&game);
    let before = game.snapshot();

    assert_eq!(game.submit_action(hand, Action::Hit), Err(RoundError::ShoeEmpty));
    assert_eq!(game.snapshot(), before);

    assert_eq!(game.void_round(), Ok(100));
    assert_eq!(game.phase(), Phase::Completed);
    assert_eq!(game.balance(), 1_000);
    assert_eq!(game.shoe().remaining(), 6 * 52);
}

#[test]
fn empty_shoe_during_dealer_turn_rolls_back_the_stand() {
    let mut game = Game::new(TableConfig::default(), 9).unwrap().with_balance(1_000);
    game.replace_shoe(Shoe::from_cards(vec![
        card(Suit::Spades, Rank::Ten),
        card(Suit::Hearts, Rank::Ten),
        card(Suit::Clubs, Rank::Eight),
        card(Suit::Diamonds, Rank::Six),
    ]))
    .unwrap();

    game.place_bet(Bet::new(100)).unwrap();
    let hand = player_hand(&game);
    game.drain_events();

    assert_eq!(game.submit_action(hand, Action::Stand), Err(RoundError::ShoeEmpty));
    assert_eq!(game.phase(), Phase::PlayerTurn);
    assert_eq!(game.hand(hand).unwrap().status(), HandStatus::Active);
    assert!(game.drain_events().is_empty());
    assert!(game.last_result().is_none());
}

#[test]
fn phase_events_follow_the_round() {
    let mut game = stacked_game(
        GameRules::default(),
        &[
            card(Suit::Spades, Rank::King),
            card(Suit::Hearts, Rank::Ten),
            card(Suit::Clubs, Rank::Queen),
            card(Suit::Diamonds, Rank::Seven),
        ],
    );

    game.place_bet(Bet::new(100)).unwrap();
    let hand = player_hand(&game);
    game.submit_action(hand, Action::Stand).unwrap();
    game.next_round().unwrap();

    let phases: Vec<(Phase, Phase)> = game
        .drain_events()
        .into_iter()
        .map(|PhaseEvent { from, to, .. }| (from, to))
        .collect();
    assert_eq!(
        phases,
        vec![
            (Phase::Betting, Phase::Dealing),
            (Phase::Dealing, Phase::PlayerTurn),
            (Phase::PlayerTurn, Phase::DealerTurn),
            (Phase::DealerTurn, Phase::Settlement),
            (Phase::Settlement, Phase::Cleanup),
            (Phase::Cleanup, Phase::Completed),
            (Phase::Completed, Phase::Betting),
        ]
    );
    assert_eq!(game.round_number(), 2);
    assert_eq!(game.phase(), Phase::Betting);
}

#[test]
fn snapshot_hides_the_hole_card() {
    let mut game = stacked_game(
        GameRules::default(),
        &[
            card(Suit::Spades, Rank::Nine),
            card(Suit::Hearts, Rank::Six),
            card(Suit::Clubs, Rank::Seven),
            card(Suit::Diamonds, Rank::King),
        ],
    );

    let snapshot = game.place_bet(Bet::new(100)).unwrap();
    assert_eq!(snapshot.phase, Phase::PlayerTurn);
    assert_eq!(snapshot.dealer_cards.len(), 2);
    assert_eq!(snapshot.dealer_cards[0].map(|c| c.rank), Some(Rank::Six));
    assert!(snapshot.dealer_cards[1].is_none());
    assert_eq!(snapshot.dealer_value.total, 6);
    assert_eq!(snapshot.hands[0].value().total, 16);
    assert_eq!(snapshot.current_hand, Some(snapshot.hands[0].id()));
}

#[test]
fn shoe_is_replaced_only_at_cleanup() {
    let config = TableConfig::default();
    let mut game = Game::new(config, 11).unwrap().with_balance(1_000);
    let stacked = Shoe::from_cards(vec![
        card(Suit::Spades, Rank::Ten),
        card(Suit::Hearts, Rank::Ten),
        card(Suit::Clubs, Rank::Six),
        card(Suit::Diamonds, Rank::Seven),
        card(Suit::Clubs, Rank::Two),
        card(Suit::Clubs, Rank::Three),
        card(Suit::Clubs, Rank::Four),
        card(Suit::Clubs, Rank::Five),
    ])
    .with_cut_card(0.5)
    .unwrap();
    game.replace_shoe(stacked).unwrap();

    game.place_bet(Bet::new(100)).unwrap();
    assert!(game.shoe().needs_reshuffle());
    assert_eq!(game.shoe().remaining(), 4);
    assert!(game.replace_shoe(Shoe::from_cards(Vec::new())).is_err());

    let hand = player_hand(&game);
    game.submit_action(hand, Action::Stand).unwrap();

    let result = game.last_result().unwrap();
    assert!(result.shoe.reshuffled);
    assert_eq!(result.shoe.remaining, 4);
    assert_eq!(game.shoe().remaining(), 6 * 52);
    assert!(!game.shoe().needs_reshuffle());
}

#[test]
fn one_deck_shoe_plays_through_its_end() {
    let config = TableConfig {
        rules: GameRules::default().with_decks(1),
        shoe: ShoeConfig::default().with_penetration(1.0),
        ..TableConfig::default()
    };
    let mut game = Game::new(config, 3).unwrap().with_balance(100_000);
    assert_eq!(game.shoe().cut_card_position(), 0);

    let mut replaced = 0;
    for round in 0..60 {
        if let Err(err) = game.place_bet(Bet::new(10)) {
            panic!("round {round}: {err}");
        }
        while let Some(hand) = game.current_hand() {
            game.submit_action(hand, Action::Stand).unwrap();
        }
        let result = game.last_result().unwrap();
        if result.shoe.reshuffled {
            replaced += 1;
            assert!(result.shoe.remaining < ROUND_RESERVE);
        }
        assert!(game.shoe().remaining() >= ROUND_RESERVE);
        game.next_round().unwrap();
    }

    // 60 rounds take at least 240 cards from a 52-card shoe.
    assert!(replaced >= 4);
}

#[test]
fn short_shoe_is_recovered_between_rounds() {
    let mut game = Game::new(TableConfig::default(), 13)
        .unwrap()
        .with_balance(1_000);
    game.replace_shoe(Shoe::from_cards(vec![
        card(Suit::Spades, Rank::Ten),
        card(Suit::Hearts, Rank::Nine),
        card(Suit::Clubs, Rank::Six),
        card(Suit::Diamonds, Rank::Eight),
    ]))
    .unwrap();

    game.place_bet(Bet::new(100)).unwrap();
    assert_eq!(
        game.reshuffle(),
        Err(RoundError::IllegalAction(IllegalAction::WrongPhase))
    );
    assert_eq!(game.shoe().remaining(), 0);
    assert_eq!(game.void_round(), Ok(100));
    game.next_round().unwrap();

    game.replace_shoe(Shoe::from_cards(vec![
        card(Suit::Spades, Rank::Ten),
        card(Suit::Hearts, Rank::Nine),
    ]))
    .unwrap();
    assert_eq!(game.place_bet(Bet::new(100)).err(), Some(RoundError::ShoeEmpty));
    assert_eq!(game.phase(), Phase::Betting);
    assert_eq!(game.balance(), 1_000);
    assert_eq!(game.shoe().remaining(), 2);

    game.reshuffle().unwrap();
    assert_eq!(game.shoe().remaining(), 6 * 52);
    game.place_bet(Bet::new(100)).unwrap();
    assert_ne!(game.phase(), Phase::Betting);
}

#[test]
fn same_seed_deals_the_same_rounds() {
    let play = |seed: u64| {
        let mut game = Game::new(TableConfig::default(), seed)
            .unwrap()
            .with_balance(10_000);
        let mut nets = Vec::new();
        for _ in 0..20 {
            game.place_bet(Bet::new(10)).unwrap();
            while let Some(hand) = game.current_hand() {
                let total = game.hand(hand).unwrap().value().total;
                let action = if total < 17 { Action::Hit } else { Action::Stand };
                game.submit_action(hand, action).unwrap();
            }
            nets.push(game.last_result().unwrap().net);
            game.next_round().unwrap();
        }
        (nets, game.balance())
    };

    assert_eq!(play(2024), play(2024));
}

#[test]
fn balance_matches_the_sum_of_round_results() {
    let mut game = Game::new(TableConfig::default(), 5)
        .unwrap()
        .with_balance(10_000);
    let mut expected: isize = 10_000;

    for _ in 0..50 {
        game.place_bet(Bet::new(20).with_side_bet(SideBetKind::TwentyOnePlusThree, 5))
            .unwrap();
        while let Some(hand) = game.current_hand() {
            let actions = game.legal_actions(hand);
            let action = if actions.contains(&Action::Double) {
                Action::Double
            } else {
                Action::Stand
            };
            game.submit_action(hand, action).unwrap();
        }
        expected += game.last_result().unwrap().net;
        game.next_round().unwrap();
    }

    assert_eq!(game.balance() as isize, expected);
}
