use std::time::Duration;

use game_content::ContentFactory;
use game_core::{
    ActorRef, CastError, Duel, ErrorSeverity, GameEvent, Side, SpellId, Target, TurnPhase,
};
use runtime::{
    AiDecision, AiPolicy, Event, Runtime, RuntimeConfig, RuntimeError, RuntimeHandle, Topic,
};
use tokio::sync::broadcast;
use tokio::time::{sleep, timeout};

// ============================================================================
// Helpers
// ============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// AI that always casts the default action at one target.
struct Scripted(Target);

impl AiPolicy for Scripted {
    fn decide(&mut self, _duel: &Duel) -> AiDecision {
        AiDecision::Cast {
            spell: SpellId::BasicAttack,
            target: self.0,
        }
    }

    fn next_skill(&mut self, _duel: &Duel) -> Option<SpellId> {
        None
    }
}

fn config() -> RuntimeConfig {
    RuntimeConfig {
        ai_seed: Some(7),
        ..RuntimeConfig::default()
    }
}

async fn start(policy: Option<Scripted>, config: RuntimeConfig) -> Runtime {
    let content = ContentFactory::embedded().expect("embedded content should load");
    let builder = Runtime::builder().config(config).content(content);
    let builder = match policy {
        Some(policy) => builder.ai_policy(policy),
        None => builder,
    };
    builder.build().await.expect("runtime should build")
}

async fn attack_opponent(handle: &RuntimeHandle) -> Result<(), RuntimeError> {
    handle.select_target(Some(Target::Opponent)).await?;
    handle.request_cast(SpellId::BasicAttack).await?;
    Ok(())
}

/// Polls until the player may act. Returns false if the match ended first.
async fn wait_for_player_turn(handle: &RuntimeHandle) -> bool {
    loop {
        let snapshot = handle.snapshot().await.expect("snapshot should succeed");
        match snapshot.phase {
            TurnPhase::PlayerTurn { actions_remaining } if actions_remaining > 0 => return true,
            TurnPhase::GameOver { .. } => return false,
            _ => sleep(Duration::from_millis(100)).await,
        }
    }
}

async fn next_matching(
    rx: &mut broadcast::Receiver<Event>,
    predicate: impl Fn(&GameEvent) -> bool,
) -> GameEvent {
    timeout(Duration::from_secs(60), async {
        loop {
            let event = rx.recv().await.expect("event bus should stay open");
            if predicate(event.game_event()) {
                return event.into_game_event();
            }
        }
    })
    .await
    .expect("expected event was not published")
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test(start_paused = true)]
async fn player_and_ai_trade_a_full_round() {
    init_tracing();
    let runtime = start(Some(Scripted(Target::Opponent)), config()).await;
    let handle = runtime.handle();
    let mut combat = handle.subscribe(Topic::Combat);
    let mut turns = handle.subscribe(Topic::Turn);

    // Player turn: two basic attacks
    for _ in 0..2 {
        handle
            .select_target(Some(Target::Opponent))
            .await
            .expect("select should succeed");
        let outcome = handle
            .request_cast(SpellId::BasicAttack)
            .await
            .expect("cast should succeed")
            .expect("auto arrive resolves immediately");
        assert_eq!(outcome.damage_dealt, 10);
    }

    // AI turn runs on the worker's clock
    next_matching(&mut turns, |event| {
        matches!(event, GameEvent::TurnStarted { side: Side::Ai })
    })
    .await;
    let hit = next_matching(&mut combat, |event| {
        matches!(event, GameEvent::DamageDealt { attacker: Side::Ai, .. })
    })
    .await;
    assert!(matches!(
        hit,
        GameEvent::DamageDealt {
            target: ActorRef::Combatant(Side::Player),
            amount: 10,
            ..
        }
    ));

    assert!(wait_for_player_turn(&handle).await);
    let snapshot = handle.snapshot().await.expect("snapshot should succeed");
    assert_eq!(snapshot.player.ledger.health(), 80);
    assert_eq!(snapshot.ai.ledger.health(), 80);
    assert_eq!(
        snapshot.phase,
        TurnPhase::PlayerTurn {
            actions_remaining: 2
        }
    );

    runtime.shutdown().await.expect("shutdown should succeed");
}

#[tokio::test(start_paused = true)]
async fn reckless_ai_dies_to_a_counterattack() {
    init_tracing();
    let mut runtime = start(Some(Scripted(Target::MiniBoss)), config()).await;
    let handle = runtime.handle();
    let mut turns = handle.subscribe(Topic::Turn);

    attack_opponent(&handle).await.expect("first attack");
    attack_opponent(&handle).await.expect("second attack");

    // Mini boss is two levels up: 30 * 3 = 90 counter against 80 health.
    let winner = timeout(Duration::from_secs(60), runtime.wait_for_winner())
        .await
        .expect("match should end")
        .expect("outcome should be published");
    assert_eq!(winner, Side::Player);
    assert_eq!(runtime.winner(), Some(Side::Player));

    let over = next_matching(&mut turns, |event| {
        matches!(event, GameEvent::MatchOver { .. })
    })
    .await;
    assert_eq!(
        over,
        GameEvent::MatchOver {
            winner_is_player: true
        }
    );

    let err = attack_opponent(&handle)
        .await
        .expect_err("casting is disabled after game over");
    assert!(matches!(
        err,
        RuntimeError::Cast(CastError::CastingDisabled)
    ));

    runtime.shutdown().await.expect("shutdown should succeed");
}

#[tokio::test(start_paused = true)]
async fn player_wins_a_long_match() {
    init_tracing();
    let mut runtime = start(Some(Scripted(Target::Opponent)), config()).await;
    let handle = runtime.handle();

    // Both sides trade 10 damage; the player always strikes first.
    while wait_for_player_turn(&handle).await {
        for _ in 0..2 {
            match attack_opponent(&handle).await {
                Ok(()) => {}
                Err(RuntimeError::Cast(CastError::CastingDisabled)) => break,
                Err(err) => panic!("unexpected error: {err}"),
            }
        }
    }

    let winner = runtime.wait_for_winner().await.expect("match should end");
    assert_eq!(winner, Side::Player);
    let snapshot = handle.snapshot().await.expect("snapshot should succeed");
    assert_eq!(snapshot.ai.ledger.health(), 0);
    assert_eq!(snapshot.player.ledger.health(), 20);

    runtime.shutdown().await.expect("shutdown should succeed");
}

#[tokio::test(start_paused = true)]
async fn missing_ai_policy_skips_ai_turns() {
    init_tracing();
    let runtime = start(None, config()).await;
    let handle = runtime.handle();

    attack_opponent(&handle).await.expect("first attack");
    attack_opponent(&handle).await.expect("second attack");

    assert!(wait_for_player_turn(&handle).await);
    let snapshot = handle.snapshot().await.expect("snapshot should succeed");
    assert_eq!(snapshot.player.ledger.health(), 100);
    assert_eq!(snapshot.ai.ledger.health(), 80);

    runtime.shutdown().await.expect("shutdown should succeed");
}

#[tokio::test(start_paused = true)]
async fn casts_wait_for_engagement_range() {
    init_tracing();
    let config = RuntimeConfig {
        auto_arrive: false,
        ..config()
    };
    let runtime = start(Some(Scripted(Target::Opponent)), config).await;
    let handle = runtime.handle();

    handle
        .select_target(Some(Target::Mob))
        .await
        .expect("select should succeed");
    let pending = handle
        .request_cast(SpellId::BasicAttack)
        .await
        .expect("cast should be accepted");
    assert!(pending.is_none());

    let outcome = handle
        .on_arrived_at_engagement_range(Side::Player)
        .await
        .expect("arrival should be delivered")
        .expect("pending cast resolves on arrival");
    assert_eq!(outcome.damage_dealt, 10);
    assert_eq!(outcome.counter_damage, 10);

    runtime.shutdown().await.expect("shutdown should succeed");
}

#[tokio::test(start_paused = true)]
async fn rejected_requests_surface_core_errors() {
    init_tracing();
    let runtime = start(Some(Scripted(Target::Opponent)), config()).await;
    let handle = runtime.handle();

    let err = handle
        .request_cast(SpellId::BasicAttack)
        .await
        .expect_err("no target selected");
    assert!(matches!(err, RuntimeError::Cast(CastError::NoTarget)));
    assert_eq!(err.severity(), Some(ErrorSeverity::Validation));

    let err = handle
        .buy_item(game_core::ItemKind::HealthPotion)
        .await
        .expect_err("player starts without gold");
    assert!(matches!(err, RuntimeError::Purchase(_)));

    let unlock = handle
        .unlock_skill(SpellId::IceBolt)
        .await
        .expect("starting skill point buys Ice Bolt");
    assert_eq!(unlock.level, 1);

    runtime.shutdown().await.expect("shutdown should succeed");
}

#[tokio::test]
async fn build_requires_a_catalog() {
    let Err(err) = Runtime::builder().build().await else {
        panic!("runtime built without a spell catalog");
    };
    assert!(matches!(err, RuntimeError::MissingCatalog));
}
