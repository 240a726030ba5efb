// ═══════════════════════════════════════════════════════════════════════
// Game Engine — action validation and the turn/phase state machine
//
// Architecture:
//   The engine is a pure state machine. It never does I/O. The caller
//   holds a GameState, submits an Action, and gets the mutated state (or
//   a BattleResult) back. Persisting and broadcasting is the caller's job.
//
// Flow:
//   1. Caller asks `validate_action()` (optional, for a cheap yes/no)
//   2. Caller calls `process_action(state, action, rng)`
//   3. The engine re-validates; a rejected action leaves the state untouched
//   4. Repeat until state.phase == Finished
// ═══════════════════════════════════════════════════════════════════════

use crate::combat;
use crate::error::{GameError, Result, RuleViolation};
use crate::movement;
use crate::reinforcement::calculate_reinforcement_armies;
use crate::types::*;
use rand::Rng;
use tracing::{debug, info};

/// What `process_action` produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The state was updated in place.
    Updated,
    /// An attack was resolved; also stored in `state.last_battle`.
    Battle(BattleResult),
}

impl Outcome {
    pub fn battle(&self) -> Option<&BattleResult> {
        match self {
            Outcome::Battle(b) => Some(b),
            Outcome::Updated => None,
        }
    }
}

/// Parse a wire action. Unknown `type` values are a caller bug, not a rule violation.
pub fn parse_action(json: &str) -> Result<Action> {
    serde_json::from_str(json).map_err(|e| GameError::MalformedAction(e.to_string()))
}

// ── Validation ─────────────────────────────────────────────────────────

fn territory(state: &GameState, id: TerritoryId) -> Result<&Territory> {
    state.territory(id).ok_or(GameError::UnknownTerritory(id))
}

fn require_phase(state: &GameState, action: &ActionKind, phase: Phase) -> Result<()> {
    if state.phase == phase {
        Ok(())
    } else {
        Err(RuleViolation::WrongPhase { action: action.name(), phase: state.phase }.into())
    }
}

/// Full legality check. `Rejected` for rule violations, other variants for
/// references that do not exist.
pub fn check_action(state: &GameState, action: &Action) -> Result<()> {
    if state.is_finished() {
        return Err(RuleViolation::GameFinished.into());
    }
    if action.player_id != state.current_player {
        return Err(RuleViolation::NotYourTurn {
            expected: state.current_player.clone(),
            actual: action.player_id.clone(),
        }
        .into());
    }
    let actor = &action.player_id;
    let player = state.player(actor).ok_or_else(|| GameError::UnknownPlayer(actor.clone()))?;

    let kind = &action.kind;
    match kind {
        ActionKind::Deploy { territory: id, armies } => {
            let target = territory(state, *id)?;
            require_phase(state, kind, Phase::Reinforcement)?;
            if !target.owner.is(actor) {
                return Err(RuleViolation::NotOwner(*id).into());
            }
            if *armies == 0 {
                return Err(RuleViolation::NonPositiveAmount.into());
            }
            if *armies > player.pool {
                return Err(RuleViolation::ExceedsPool { requested: *armies, pool: player.pool }.into());
            }
            Ok(())
        }

        ActionKind::Attack { from, to, armies } => {
            let source = territory(state, *from)?;
            let destination = territory(state, *to)?;
            require_phase(state, kind, Phase::Attack)?;
            if !source.owner.is(actor) {
                return Err(RuleViolation::NotOwner(*from).into());
            }
            let friendly = destination.owner.player()
                .is_some_and(|owner| movement::same_alliance(state, owner, actor));
            if friendly {
                return Err(RuleViolation::OwnTerritory(*to).into());
            }
            let risked = armies.unwrap_or(1);
            if risked == 0 {
                return Err(RuleViolation::NonPositiveAmount.into());
            }
            if source.armies <= risked {
                return Err(RuleViolation::InsufficientArmies {
                    territory: *from,
                    available: source.armies,
                    required: risked,
                }
                .into());
            }
            if !source.is_adjacent(*to) {
                return Err(RuleViolation::NotAdjacent { from: *from, to: *to }.into());
            }
            Ok(())
        }

        ActionKind::Fortify { from, to, armies } => {
            let source = territory(state, *from)?;
            territory(state, *to)?;
            require_phase(state, kind, Phase::Fortify)?;
            if !source.owner.is(actor) {
                return Err(RuleViolation::NotOwner(*from).into());
            }
            if *armies == 0 {
                return Err(RuleViolation::NonPositiveAmount.into());
            }
            if source.armies <= *armies {
                return Err(RuleViolation::InsufficientArmies {
                    territory: *from,
                    available: source.armies,
                    required: *armies,
                }
                .into());
            }
            movement::check_route(state, *from, *to, actor)?;
            Ok(())
        }

        ActionKind::EndTurn => Ok(()),

        ActionKind::BeginTurn => require_phase(state, kind, Phase::Setup),

        ActionKind::GoBackToReinforcement => {
            require_phase(state, kind, Phase::Attack)?;
            if state.has_attacked_this_turn {
                return Err(RuleViolation::AlreadyAttacked.into());
            }
            Ok(())
        }
    }
}

/// Is the action legal right now? Missing territories or players are
/// reported as errors rather than `false`.
pub fn validate_action(state: &GameState, action: &Action) -> Result<bool> {
    match check_action(state, action) {
        Ok(()) => Ok(true),
        Err(GameError::Rejected(_)) => Ok(false),
        Err(e) => Err(e),
    }
}

// ── Processing ─────────────────────────────────────────────────────────

/// Validate and apply an action. On any error the state is left unchanged.
pub fn process_action<R: Rng + ?Sized>(
    state: &mut GameState,
    action: &Action,
    rng: &mut R,
) -> Result<Outcome> {
    check_action(state, action)?;
    debug!(
        room = %state.room_id,
        player = %action.player_id,
        phase = %state.phase,
        action = action.kind.name(),
        "applying action"
    );

    let outcome = match action.kind {
        ActionKind::Deploy { territory, armies } => {
            apply_deploy(state, territory, armies);
            Outcome::Updated
        }
        ActionKind::Attack { from, to, .. } => Outcome::Battle(apply_attack(state, from, to, rng)),
        ActionKind::Fortify { from, to, armies } => {
            apply_fortify(state, from, to, armies);
            Outcome::Updated
        }
        ActionKind::EndTurn | ActionKind::BeginTurn => {
            end_phase(state);
            Outcome::Updated
        }
        ActionKind::GoBackToReinforcement => {
            state.phase = Phase::Reinforcement;
            refresh_pool(state);
            info!(room = %state.room_id, player = %state.current_player, "back to reinforcement");
            Outcome::Updated
        }
    };
    Ok(outcome)
}

fn apply_deploy(state: &mut GameState, id: TerritoryId, armies: u32) {
    state.territories[id.index()].armies += armies;
    let actor = state.current_player.clone();
    if let Some(player) = state.player_mut(&actor) {
        player.pool -= armies;
    }
}

fn apply_attack<R: Rng + ?Sized>(state: &mut GameState, from: TerritoryId, to: TerritoryId, rng: &mut R) -> BattleResult {
    let attacker = state.current_player.clone();
    let attacker_dice = combat::attacker_dice(state.territories[from.index()].armies);
    let defender_dice = combat::defender_dice(state.territories[to.index()].armies);
    let outcome = combat::resolve(rng, attacker_dice, defender_dice);

    let defender = state.territories[to.index()].owner.clone();
    {
        let source = &mut state.territories[from.index()];
        source.armies = source.armies.saturating_sub(outcome.attacker_losses);
    }
    let destination = &mut state.territories[to.index()];
    destination.armies = destination.armies.saturating_sub(outcome.defender_losses);
    let conquered = destination.armies == 0;

    let mut eliminated = None;
    if conquered {
        destination.owner = Owner::Player(attacker.clone());
        destination.armies = 1;
        state.territories[from.index()].armies -= 1;

        if let Some(loser) = defender.player() {
            if let Some(p) = state.player_mut(loser) {
                p.territories.remove(&to);
            }
        }
        if let Some(p) = state.player_mut(&attacker) {
            p.territories.insert(to);
        }
        info!(
            room = %state.room_id,
            attacker = %attacker,
            territory = crate::map::territory_name(to),
            "territory conquered"
        );
        eliminated = update_eliminations(state).into_iter().next();
    }
    state.has_attacked_this_turn = true;
    check_victory(state);

    let result = BattleResult {
        from,
        to,
        attacker,
        defender,
        attacker_rolls: outcome.attacker_rolls,
        defender_rolls: outcome.defender_rolls,
        attacker_losses: outcome.attacker_losses,
        defender_losses: outcome.defender_losses,
        conquered,
        eliminated,
        game_over: state.is_finished(),
        winner: state.winner.clone(),
    };
    state.last_battle = Some(result.clone());
    result
}

fn apply_fortify(state: &mut GameState, from: TerritoryId, to: TerritoryId, armies: u32) {
    state.territories[from.index()].armies -= armies;
    state.territories[to.index()].armies += armies;
    state.moved_this_phase.insert(from);
}

/// end_turn / begin_turn: move to the next phase, or the next player after fortify.
fn end_phase(state: &mut GameState) {
    match state.phase {
        Phase::Setup => {
            state.phase = Phase::Reinforcement;
        }
        Phase::Reinforcement => {
            state.phase = Phase::Attack;
            state.has_attacked_this_turn = false;
        }
        Phase::Attack => {
            state.phase = Phase::Fortify;
            state.moved_this_phase.clear();
        }
        Phase::Fortify => {
            advance_turn(state);
            return;
        }
        Phase::Finished => return,
    }
    debug!(room = %state.room_id, phase = %state.phase, "phase changed");
}

fn advance_turn(state: &mut GameState) {
    update_eliminations(state);
    if check_victory(state) {
        return;
    }

    let count = state.players.len();
    let current = state.player_index(&state.current_player).unwrap_or(0);
    let next = (1..=count)
        .map(|step| (current + step) % count)
        .find(|&i| !state.players[i].eliminated);
    let first_active = state.players.iter().position(|p| !p.eliminated);
    let (Some(next), Some(first_active)) = (next, first_active) else {
        return;
    };

    if next == first_active {
        state.turn += 1;
    }
    state.current_player = state.players[next].id.clone();
    state.phase = Phase::Reinforcement;
    state.has_attacked_this_turn = false;
    state.moved_this_phase.clear();
    state.last_battle = None;
    refresh_pool(state);

    info!(
        room = %state.room_id,
        turn = state.turn,
        player = %state.current_player,
        pool = state.player(&state.current_player).map_or(0, |p| p.pool),
        "turn started"
    );
}

fn refresh_pool(state: &mut GameState) {
    let current = state.current_player.clone();
    let armies = calculate_reinforcement_armies(state, &current);
    if let Some(player) = state.player_mut(&current) {
        player.pool = armies;
    }
}

/// Mark every player without territories as eliminated.
/// Returns the players newly knocked out.
fn update_eliminations(state: &mut GameState) -> Vec<PlayerId> {
    let mut newly = Vec::new();
    for player in &mut state.players {
        if !player.eliminated && player.territories.is_empty() {
            player.eliminated = true;
            player.pool = 0;
            newly.push(player.id.clone());
        }
    }
    for id in &newly {
        info!(room = %state.room_id, player = %id, "player eliminated");
    }
    newly
}

/// Finish the game when at most one player is left standing.
pub(crate) fn check_victory(state: &mut GameState) -> bool {
    if state.is_finished() {
        return true;
    }
    if state.active_players().count() > 1 {
        return false;
    }
    let winner = state.active_players().next().map(|p| p.id.clone());
    state.winner = winner;
    state.phase = Phase::Finished;
    info!(
        room = %state.room_id,
        winner = state.winner.as_ref().map_or("<none>", |w| w.as_str()),
        "game finished"
    );
    true
}

// ── Queries ────────────────────────────────────────────────────────────

/// A representative set of legal actions for the current player: whole-pool
/// deploys, default-risk attacks, all-but-one fortifies, plus phase controls.
pub fn legal_actions(state: &GameState) -> Vec<Action> {
    let actor = state.current_player.clone();
    let room = state.room_id.clone();
    let make = |kind: ActionKind| Action::new(room.clone(), actor.clone(), kind);
    let mut actions = Vec::new();

    match state.phase {
        Phase::Finished => return actions,
        Phase::Setup => actions.push(make(ActionKind::BeginTurn)),
        Phase::Reinforcement => {
            let pool = state.player(&actor).map_or(0, |p| p.pool);
            if pool > 0 {
                for t in state.owned_by(&actor) {
                    actions.push(make(ActionKind::Deploy { territory: t.id, armies: pool }));
                }
            }
        }
        Phase::Attack => {
            for t in state.owned_by(&actor).filter(|t| t.armies >= 2) {
                for &adj in &t.adjacent {
                    let action = make(ActionKind::Attack { from: t.id, to: adj, armies: None });
                    if check_action(state, &action).is_ok() {
                        actions.push(action);
                    }
                }
            }
            if !state.has_attacked_this_turn {
                actions.push(make(ActionKind::GoBackToReinforcement));
            }
        }
        Phase::Fortify => {
            for t in state.owned_by(&actor).filter(|t| t.armies >= 2) {
                for to in movement::valid_destinations(state, t.id, &actor) {
                    actions.push(make(ActionKind::Fortify { from: t.id, to, armies: t.armies - 1 }));
                }
            }
        }
    }
    actions.push(make(ActionKind::EndTurn));
    actions
}
