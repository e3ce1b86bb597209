use square_calls::formation::match_formations;
use square_calls::geometry::angles_equal;
use square_calls::handhold::animate_frame;
use square_calls::library::{FormationRef, MoveRef, PathStep};
use square_calls::{
    CallContext, CallDefinition, CallError, Catalog, Dancer, Formation, Gender, HandholdConfig,
    Library, Sequence,
};

fn facing_couples() -> Formation {
    Formation::new("Facing Couples")
        .dancer(Gender::Boy, -1.0, 1.0, 0.0)
        .dancer(Gender::Girl, -1.0, -1.0, 0.0)
}

fn standard(name: &str) -> CallContext {
    let lib = Library::standard();
    let f = lib.formation(name).unwrap();
    CallContext::from_formation(lib, &f)
}

fn perform(ctx: &mut CallContext, text: &str) -> Result<(), CallError> {
    ctx.interpret_call(text)?;
    ctx.perform_call()
}

fn role_table(dancers: &[Dancer]) -> String {
    dancers
        .iter()
        .map(|d| {
            let r = d.roles;
            let flags = [
                (r.beau, "beau"),
                (r.belle, "belle"),
                (r.leader, "leader"),
                (r.trailer, "trailer"),
                (r.center, "center"),
                (r.very_center, "very_center"),
                (r.end, "end"),
            ];
            let mut line = format!("{} {}", d.number, d.gender);
            for (_, name) in flags.iter().filter(|(on, _)| *on) {
                line.push(' ');
                line.push_str(name);
            }
            if let Some(p) = r.partner {
                line.push_str(&format!(" partner={}", dancers[p].number));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ==================== Analysis scenarios ====================

#[test]
fn facing_couples_roles() {
    let mut ctx = CallContext::from_formation(Library::standard(), &facing_couples());
    ctx.analyze();
    insta::assert_snapshot!(role_table(&ctx.dancers), @r"
    1 boy beau trailer partner=3
    2 boy beau trailer partner=4
    3 girl belle trailer partner=1
    4 girl belle trailer partner=2
    ");
}

#[test]
fn standard_formation_matches_itself_only() {
    let lib = Library::standard();
    let lines = lib.formation("Normal Lines").unwrap().dancers();
    let dpt = lib.formation("Double Pass Thru").unwrap().dancers();

    let mut source = lines.clone();
    let mapping = match_formations(&mut source, &lines, true, false).unwrap();
    let mut seen = mapping.clone();
    seen.sort_unstable();
    assert_eq!(seen, (0..8).collect::<Vec<_>>());
    for (i, &m) in mapping.iter().enumerate() {
        assert_eq!(lines[i].gender, lines[m].gender);
    }

    let mut source = lines.clone();
    assert_eq!(match_formations(&mut source, &dpt, false, false), None);
}

#[test]
fn fuzzy_match_turns_pairs_around() {
    let facing = Formation::new("Facing Dancers")
        .dancer(Gender::Boy, -1.0, 0.0, 0.0)
        .dancers();

    // Back to back: turning the pair around makes it fit
    let mut source = Formation::new("Back to Back")
        .dancer(Gender::Boy, -1.0, 0.0, 180.0)
        .dancers();
    assert_eq!(match_formations(&mut source, &facing, false, true), Some(vec![0, 1]));
    assert!(angles_equal(source[0].facing(), 0.0));

    // A wave does not fit either way round, and stays turned
    let mut source = Formation::new("Wave")
        .dancer(Gender::Boy, -1.0, 0.0, 90.0)
        .dancers();
    assert_eq!(match_formations(&mut source, &facing, false, true), None);
    assert!(angles_equal(source[0].facing(), -std::f64::consts::FRAC_PI_2));
}

// ==================== Call scenarios ====================

#[test]
fn lines_circulate_together() {
    let mut ctx = standard("Normal Lines");
    let facing: Vec<f64> = ctx.dancers.iter().map(Dancer::facing).collect();
    perform(&mut ctx, "circulate").unwrap();
    assert_eq!(ctx.callname(), "Circulate");
    for (d, a) in ctx.dancers.iter().zip(facing) {
        assert!((d.beats() - 4.0).abs() < 1e-9, "dancer {d}");
        assert!(angles_equal(d.facing(), a), "dancer {d}");
    }

    // Still lines, but facing out now
    ctx.animate_to_end();
    let lines = Library::standard().formation("Normal Lines").unwrap().dancers();
    let mut end = ctx.snapshot().dancers;
    assert_eq!(match_formations(&mut end, &lines, false, false), None);
    let mut end = ctx.snapshot().dancers;
    assert!(match_formations(&mut end, &lines, false, true).is_some());
}

#[test]
fn box_circulate_uses_definition() {
    let walk = || -> [PathStep; 1] { [MoveRef::new("Forward").scale(2.0, 1.0).beats(2.0).into()] };
    let def = CallDefinition::new("Box Circulate", FormationRef::Inline(facing_couples()))
        .path(walk())
        .path(walk());
    let lib = Library::with_store(Catalog::standard().with_call(def));
    let mut ctx = CallContext::from_formation(lib, &facing_couples());
    perform(&mut ctx, "circulate").unwrap();
    // The definition takes two beats, the coded fallback four
    assert!(ctx.dancers.iter().all(|d| (d.beats() - 2.0).abs() < 1e-9));
    let d = &ctx.dancers[0];
    assert!((d.location().x - 1.0).abs() < 1e-6);
    assert!((d.location().y - 1.0).abs() < 1e-6);
}

#[test]
fn illegal_call_leaves_sequence_untouched() {
    let lib = Library::standard();
    let f = lib.formation("Static Square").unwrap();
    let mut seq = Sequence::new(lib, &f);
    let err = seq.add_call(1, "boys wheel around").map(|p| p.beats);
    assert_eq!(
        err,
        Err(CallError::illegal("Dancer 1 must Wheel Around with partner."))
    );
    assert!(seq.parts().is_empty());
    assert!(seq.dancers().iter().all(|d| d.path.is_empty()));

    // The sequence carries on from where it was
    assert_eq!(seq.add_call(2, "heads face left").map(|p| p.beats), Ok(2.0));
}

#[test]
fn wheel_around_without_partners_is_illegal() {
    let apart = Formation::new("Apart")
        .dancer(Gender::Boy, -3.0, 3.0, 0.0)
        .dancer(Gender::Girl, -3.0, -3.0, 0.0);
    let mut ctx = CallContext::from_formation(Library::standard(), &apart);
    let before: Vec<_> = ctx.dancers.iter().map(|d| d.path.clone()).collect();
    let result = ctx.apply_calls(&["wheel around"]);
    assert!(matches!(result, Err(CallError::Illegal(_))), "{result:?}");
    let after: Vec<_> = ctx.dancers.iter().map(|d| d.path.clone()).collect();
    assert_eq!(before, after);
}

#[test]
fn unknown_call_is_not_found() {
    let mut ctx = standard("Normal Lines");
    assert_eq!(
        perform(&mut ctx, "spin chain the gears"),
        Err(CallError::not_found("spin chain the gears"))
    );
}

// ==================== Handhold scenarios ====================

#[test]
fn lines_hold_hands_along_the_line() {
    let lib = Library::standard();
    let f = lib.formation("Normal Lines").unwrap();
    let mut dancers = f.dancers();
    let hh = animate_frame(&mut dancers, 0.0, &HandholdConfig::default());
    assert_eq!(hh.len(), 6);
    // Nobody holds hands across to the other line
    for h in &hh {
        let (a, b) = (dancers[h.d1].location(), dancers[h.d2].location());
        assert!((a.x - b.x).abs() < 1e-9, "{} holds {}", h.d1, h.d2);
    }
}
