use std::fs;

use colored::Colorize;

use hero_dice::{
    HeroRoller, Location, ModeKind, Pool, RngSource, RollSummary, RollerConfig, Sign, TermSpec,
};

use crate::RollArgs;

pub fn run(args: &RollArgs) -> Result<(), String> {
    let config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            RollerConfig::from_json_str(&json).map_err(|e| e.to_string())?
        }
        None => RollerConfig::default(),
    };

    let mode = ModeKind::parse(&args.mode).ok_or_else(|| {
        let known: Vec<String> = ModeKind::all().iter().map(ToString::to_string).collect();
        format!("unknown mode '{}' (expected one of: {})", args.mode, known.join(", "))
    })?;

    let forced = match &args.location {
        Some(name) => Location::parse_forced(name).map_err(|e| e.to_string())?,
        None => None,
    };

    let roller = parse_terms(&args.terms)?
        .into_iter()
        .fold(HeroRoller::with_config(config), HeroRoller::add_term);
    let mut roller = with_mode(roller, mode, args)
        .add_stun_multiplier(args.stun_mult)
        .modify_to_standard_effect(args.standard_effect)
        .add_to_hit_location(args.hit_location || args.location.is_some(), forced);

    let mut source = match args.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_os_rng(),
    };

    roller.roll(&mut source).map_err(|e| e.to_string())?;
    let rolled_formula = roller.formula();
    let rolled_total = roller.basic_total().map_err(|e| e.to_string())?;

    let mut reductions = Vec::new();
    if args.explode > 0 {
        let removed = roller
            .remove_n_highest_rank_terms(args.explode)
            .map_err(|e| e.to_string())?;
        reductions.push(format!("exploded {} unit(s)", removed.len()));
    }
    if args.negate > 0 {
        let removed = roller
            .remove_first_n_terms(args.negate)
            .map_err(|e| e.to_string())?;
        reductions.push(format!("negated {} unit(s)", removed.len()));
    }
    if args.reduce_dc > 0 {
        let steps = roller.remove_n_dc(args.reduce_dc).map_err(|e| e.to_string())?;
        reductions.push(format!("reduced {steps} DC step(s)"));
    }

    let summary = roller.summary().map_err(|e| e.to_string())?;

    if args.json {
        let json = serde_json::to_string_pretty(&summary).map_err(|e| e.to_string())?;
        println!("{json}");
        return Ok(());
    }

    println!(
        "  {} {} = {}",
        "Rolled".bold(),
        display_formula(&rolled_formula),
        rolled_total
    );
    if !reductions.is_empty() {
        println!("  {} {}", "After".bold(), reductions.join(", "));
        println!("  {} {}", "Formula".bold(), display_formula(&summary.formula));
    }
    print_summary(&summary);
    Ok(())
}

/// Parse CLI terms. Operators may stand alone (`3d6 + 1`) or prefix a chunk
/// (`3d6 -1`); adjacent chunks are added. An operator must be followed by a
/// chunk.
fn parse_terms(args: &[String]) -> Result<Vec<TermSpec>, String> {
    let mut specs = Vec::new();
    let mut pending: Option<(&str, Sign)> = None;

    for token in args.iter().flat_map(|arg| arg.split_whitespace()) {
        match token {
            "+" | "-" => {
                if let Some((op, _)) = pending {
                    return Err(format!("operator '{op}' is missing a term"));
                }
                let sign = if token == "-" { Sign::Minus } else { Sign::Plus };
                pending = Some((token, sign));
            }
            chunk => {
                let mut spec = TermSpec::parse(chunk).map_err(|e| e.to_string())?;
                if let Some((_, Sign::Minus)) = pending.take() {
                    spec.sign = match spec.sign {
                        Sign::Plus => Sign::Minus,
                        Sign::Minus => Sign::Plus,
                    };
                }
                specs.push(spec);
            }
        }
    }

    if let Some((op, _)) = pending {
        return Err(format!("operator '{op}' is missing a term"));
    }
    if specs.is_empty() {
        return Err("no dice terms given".into());
    }
    Ok(specs)
}

fn with_mode(roller: HeroRoller, mode: ModeKind, args: &RollArgs) -> HeroRoller {
    match mode {
        ModeKind::Basic => roller.make_basic_roll(true),
        ModeKind::Success => roller.make_success_roll(true, args.target),
        ModeKind::Normal => roller.make_normal_roll(true),
        ModeKind::Killing => roller.make_killing_roll(true, args.adds_str),
        ModeKind::Adjustment => roller.make_adjustment_roll(true),
        ModeKind::Entangle => roller.make_entangle_roll(true),
        ModeKind::Flash => roller.make_flash_roll(true),
    }
}

fn display_formula(formula: &str) -> String {
    if formula.is_empty() {
        "(nothing)".dimmed().to_string()
    } else {
        formula.cyan().to_string()
    }
}

fn print_summary(summary: &RollSummary) {
    if summary.standard_effect {
        println!("  {}", "standard effect".dimmed());
    }

    if let Some(success) = &summary.success {
        let verdict = if success.is_success {
            "SUCCESS".green().bold()
        } else {
            "FAILURE".red().bold()
        };
        let auto = match success.auto_success {
            Some(true) => " (automatic)",
            Some(false) => " (automatic failure)",
            None => "",
        };
        println!("  {verdict} by {}{auto}", success.total);
    }

    print_pool("STUN", summary.stun.as_ref());
    print_pool("BODY", summary.body.as_ref());
    if let Some(multiplier) = summary.stun_multiplier {
        let str_note = if summary.adds_strength { " (adds STR)" } else { "" };
        println!("  {} x{multiplier}{str_note}", "STUNx".bold());
    }
    print_pool("Adjustment", summary.adjustment.as_ref());
    print_pool("Entangle BODY", summary.entangle.as_ref());
    print_pool("Flash segments", summary.flash.as_ref());

    if let Some(location) = &summary.hit_location {
        let roll = location
            .roll
            .map(|r| format!(" (rolled {r})"))
            .unwrap_or_default();
        println!(
            "  {} {}{roll}: STUNx{} BODYx{}",
            "Hit".bold(),
            location.full_name.yellow(),
            location.stun_multiplier,
            location.body_multiplier
        );
    }
}

fn print_pool(label: &str, pool: Option<&Pool>) {
    if let Some(pool) = pool {
        let terms: Vec<String> = pool.terms.iter().map(ToString::to_string).collect();
        println!(
            "  {} {} [{}]",
            format!("{label}:").bold(),
            pool.total,
            terms.join(", ")
        );
    }
}
