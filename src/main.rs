//! Ironvale - Demo front end
//!
//! A small terminal REPL that drives the combat engine against the
//! in-memory store: quick hunts, arena attacks, timed interactive
//! duels, and the battle log. Presentation only - every rule lives in
//! the library crate.

use std::io::{self, Write};
use std::path::Path;

use chrono::Utc;
use ironvale::combat::session::{BattleSession, PlayerAction, SessionEvent, SessionPhase};
use ironvale::combat::{resolve_arena, resolve_hunt, win_chance, BattleResult, INTRO_DISPLAY_MS};
use ironvale::combatant::{catalog, Adversary, Combatant, Pet, PetAbility, PetAbilityKind};
use ironvale::core::error::Result;
use ironvale::core::types::CombatantId;
use ironvale::progression::{apply_arena, apply_hunt, TomlDropTables};
use ironvale::regen;
use ironvale::store::{CombatantStore, MemoryStore};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("ironvale=info")
        .init();

    tracing::info!("Ironvale starting...");

    let mut store = MemoryStore::new();
    let now = Utc::now();
    let player_id = store.insert(Combatant::new("Adventurer", now));
    let mut rival = Combatant::new("Rival Knight", now);
    rival.level = 2;
    rival.strength = 12;
    rival.arena_points = 25;
    let rival_id = store.insert(rival);

    let pet = Pet::new("Moss", 4, PetAbility::new(PetAbilityKind::Heal, 25.0));

    let tables = match TomlDropTables::load(Path::new("data/drop_tables.toml")) {
        Ok(tables) => tables,
        Err(e) => {
            tracing::warn!("falling back to builtin drop tables: {}", e);
            TomlDropTables::builtin()
        }
    };

    let adversaries = catalog();
    let mut rng = rand::thread_rng();

    println!("\n=== IRONVALE ===");
    println!("Combat and progression demo");
    println!();
    println!("Commands:");
    println!("  status / s      - Show your combatant (applies regeneration)");
    println!("  hunts           - List catalog adversaries");
    println!("  hunt <n>        - Quick-resolve a hunt against adversary n");
    println!("  duel <n>        - Interactive timed battle against adversary n");
    println!("  arena           - Quick arena attack against your rival");
    println!("  log             - Dump your battle log");
    println!("  quit / q        - Exit");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "q" {
            break;
        }

        let outcome = match input.split_whitespace().collect::<Vec<_>>().as_slice() {
            ["status"] | ["s"] => show_status(&mut store, player_id),
            ["hunts"] => {
                list_hunts(&adversaries);
                Ok(())
            }
            ["hunt", n] => match parse_index(n, adversaries.len()) {
                Some(idx) => run_hunt(&mut store, player_id, &adversaries[idx], &tables, &mut rng),
                None => {
                    println!("No such adversary; try 'hunts'");
                    Ok(())
                }
            },
            ["duel", n] => match parse_index(n, adversaries.len()) {
                Some(idx) => run_duel(
                    &mut store,
                    player_id,
                    Some(pet.clone()),
                    &adversaries[idx],
                    &tables,
                    &mut rng,
                ),
                None => {
                    println!("No such adversary; try 'hunts'");
                    Ok(())
                }
            },
            ["arena"] => run_arena(&mut store, player_id, rival_id, &mut rng),
            ["log"] => show_log(&store, player_id),
            _ => {
                println!("Unknown command");
                Ok(())
            }
        };

        if let Err(e) = outcome {
            println!("! {}", e);
        }
    }

    println!("Farewell.");
    Ok(())
}

fn parse_index(raw: &str, len: usize) -> Option<usize> {
    raw.parse::<usize>().ok().filter(|idx| *idx < len)
}

fn show_status(store: &mut MemoryStore, player_id: CombatantId) -> Result<()> {
    // Reading a combatant settles regeneration lazily.
    let c = regen::refresh(store, player_id, Utc::now())?;
    println!(
        "{} - level {} | hp {}/{} | energy {}/{} | xp {}/{} | gold {} | arena {} | points {} | record {}W/{}B",
        c.name,
        c.level,
        c.hp.current,
        c.hp.max,
        c.energy.current,
        c.energy.max,
        c.xp,
        c.xp_to_next_level,
        c.gold,
        c.arena_points,
        c.available_points,
        c.wins,
        c.total_battles,
    );
    Ok(())
}

fn list_hunts(adversaries: &[Adversary]) {
    for (idx, a) in adversaries.iter().enumerate() {
        println!(
            "  {} - {} (level {}, {} hp, rewards {} xp / {} gold)",
            idx, a.name, a.level, a.hp_max, a.xp_reward, a.gold_reward
        );
    }
}

fn run_hunt(
    store: &mut MemoryStore,
    player_id: CombatantId,
    adversary: &Adversary,
    tables: &TomlDropTables,
    rng: &mut impl rand::Rng,
) -> Result<()> {
    let now = Utc::now();
    let player = regen::refresh(store, player_id, now)?;
    let chance = win_chance(player.attack_profile(), adversary.defense_profile());
    println!(
        "You attack {} (estimated win chance {:.0}%)...",
        adversary.name, chance
    );

    let result = resolve_hunt(&player, adversary, rng)?;
    let applied = apply_hunt(store, player_id, adversary, &result, tables, rng, now)?;
    print_result(&applied);
    Ok(())
}

fn run_arena(
    store: &mut MemoryStore,
    player_id: CombatantId,
    rival_id: CombatantId,
    rng: &mut impl rand::Rng,
) -> Result<()> {
    let now = Utc::now();
    let player = regen::refresh(store, player_id, now)?;
    let rival = regen::refresh(store, rival_id, now)?;
    println!("You challenge {} in the arena...", rival.name);

    let result = resolve_arena(&player, &rival, now, rng)?;
    let applied = apply_arena(store, player_id, rival_id, &result, now)?;
    if applied.won {
        println!(
            "Victory! You strike for {} and gain {} arena points.",
            applied.damage_dealt, applied.arena_points_change
        );
    } else {
        println!(
            "Defeat. You lose {} arena points.",
            -applied.arena_points_change
        );
    }
    Ok(())
}

fn run_duel(
    store: &mut MemoryStore,
    player_id: CombatantId,
    pet: Option<Pet>,
    adversary: &Adversary,
    tables: &TomlDropTables,
    rng: &mut impl rand::Rng,
) -> Result<()> {
    let player = regen::refresh(store, player_id, Utc::now())?;
    let mut session = BattleSession::start(&player, pet, adversary, Utc::now())?;
    println!("You square off against {}...", adversary.name);
    std::thread::sleep(std::time::Duration::from_millis(INTRO_DISPLAY_MS as u64));

    // One cooperative loop: poll the timers, prompt only during the
    // player's window. Typing slowly really does forfeit the turn.
    loop {
        print_events(&session.poll(Utc::now(), rng));
        if session.is_finished() {
            break;
        }

        if session.phase() == SessionPhase::PlayerTurn {
            let remaining = session.seconds_remaining(Utc::now()).unwrap_or(0.0);
            println!(
                "hp {}/{} vs {} {}/{} - {:.0}s to decide",
                session.player_hp(),
                player.hp.max,
                adversary.name,
                session.enemy_hp(),
                adversary.hp_max,
                remaining,
            );
            print!("[a]ttack [h]eavy [d]efend [p]et > ");
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            let action = match input.trim() {
                "a" => PlayerAction::Attack,
                "h" => PlayerAction::HeavyAttack,
                "d" => PlayerAction::Defend,
                "p" => PlayerAction::PetAbility,
                _ => {
                    println!("Pick one of a/h/d/p");
                    continue;
                }
            };

            match session.submit(action, Utc::now(), rng) {
                Ok(events) => print_events(&events),
                Err(e) => println!("! {}", e),
            }
        } else {
            std::thread::sleep(std::time::Duration::from_millis(150));
        }
    }

    let Some(result) = session.result().cloned() else {
        return Ok(());
    };
    let applied = apply_hunt(store, player_id, adversary, &result, tables, rng, Utc::now())?;
    print_result(&applied);
    Ok(())
}

fn print_events(events: &[SessionEvent]) {
    for event in events {
        println!("  [turn {}] {}", event.turn, event.text);
    }
}

fn print_result(result: &BattleResult) {
    if result.won {
        println!(
            "Victory! dealt {} / taken {} | +{} xp, +{} gold",
            result.damage_dealt, result.damage_taken, result.xp_gained, result.gold_gained
        );
        for drop in &result.drops {
            println!("  loot: {} x{}", drop.material, drop.quantity);
        }
    } else {
        println!(
            "Defeat. dealt {} / taken {} | +{} xp",
            result.damage_dealt, result.damage_taken, result.xp_gained
        );
    }
    if result.level_up {
        println!("  Level up! Now level {}.", result.new_level);
    }
}

fn show_log(store: &MemoryStore, player_id: CombatantId) -> Result<()> {
    let log = store.battle_log(player_id);
    if log.is_empty() {
        println!("No battles yet.");
        return Ok(());
    }
    println!("{}", serde_json::to_string_pretty(&log)?);
    Ok(())
}
