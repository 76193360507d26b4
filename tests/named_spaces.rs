//! Integration tests for the named-dimension layer.

use anyhow::Result;
use polyset::prelude::*;

fn band(space: &Space, name: &str, lo: i64, hi: i64) -> Result<Vec<Constraint>> {
    Ok(vec![
        Constraint::ineq_from_names(
            space.clone(),
            [(name.into(), 1), (CoeffKey::Constant, -lo)],
        )?,
        Constraint::ineq_from_names(
            space.clone(),
            [(name.into(), -1), (CoeffKey::Constant, hi)],
        )?,
    ])
}

#[test]
fn names_land_at_supplied_positions() -> Result<()> {
    let space = Space::create_from_names(Some(&["i", "j", "k"]), None, None, &["N", "M"])?;
    let dict = space.var_dict(None)?;
    assert_eq!(dict["i"], (DimType::SET, 0));
    assert_eq!(dict["j"], (DimType::SET, 1));
    assert_eq!(dict["k"], (DimType::SET, 2));
    // parameters occupy the tail of the assignment order in both branches
    assert_eq!(dict["N"], (DimType::Param, 0));
    assert_eq!(dict["M"], (DimType::Param, 1));

    let space = Space::create_from_names(None, Some(&["a"]), Some(&["b"]), &["N"])?;
    let dict = space.var_dict(None)?;
    assert_eq!(dict["a"], (DimType::In, 0));
    assert_eq!(dict["b"], (DimType::Out, 0));
    assert_eq!(dict["N"], (DimType::Param, 0));
    Ok(())
}

#[test]
fn duplicate_name_across_kinds_is_rejected() -> Result<()> {
    let space = Space::create_from_names(Some(&["i", "j"]), None, None, &["i"])?;
    assert_eq!(
        space.var_dict(None).unwrap_err(),
        PolySetError::DuplicateName("i".into())
    );
    Ok(())
}

#[test]
fn coefficient_round_trip_is_sparse() -> Result<()> {
    let space = Space::create_from_names(Some(&["x", "y", "z"]), None, None, &[])?;
    let c = Constraint::eq_from_names(
        space,
        [("x".into(), 2), ("y".into(), -1), (CoeffKey::Constant, 5)],
    )?;

    let coeffs = c.get_coefficients_by_name(None, None)?;
    assert_eq!(coeffs.len(), 3);
    assert_eq!(coeffs[&CoeffKey::from("x")], 2);
    assert_eq!(coeffs[&CoeffKey::from("y")], -1);
    assert_eq!(coeffs[&CoeffKey::Constant], 5);
    // z has coefficient zero and must be absent, not present-as-zero
    assert!(!coeffs.contains_key(&CoeffKey::from("z")));
    Ok(())
}

#[test_log::test]
fn projection_is_idempotent() -> Result<()> {
    let space = Space::create_from_names(Some(&["i", "j", "k"]), None, None, &[])?;
    let mut domain = BasicSet::universe(space.clone())?;
    for name in ["i", "j", "k"] {
        domain = domain.add_constraints(&band(&space, name, 0, 9)?)?;
    }

    let once = domain.project_out_except(&["i"], &[DimType::SET])?;
    let twice = once.clone().project_out_except(&["i"], &[DimType::SET])?;
    assert!(Set::from_basic_set(once).is_equal(&Set::from_basic_set(twice)));
    Ok(())
}

#[test]
fn kept_names_survive_projection() -> Result<()> {
    let space = Space::create_from_names(Some(&["a", "b", "c", "d", "e"]), None, None, &["N"])?;
    let domain = BasicSet::universe(space)?;
    let projected = domain.project_out_except(&["b", "d"], &[DimType::SET])?;

    let dict = projected.space().var_dict(None)?;
    assert_eq!(dict["b"], (DimType::SET, 0));
    assert_eq!(dict["d"], (DimType::SET, 1));
    // untouched kinds keep their entries too
    assert_eq!(dict["N"], (DimType::Param, 0));
    assert!(!dict.contains_key("a"));
    assert!(!dict.contains_key("c"));
    assert!(!dict.contains_key("e"));
    Ok(())
}

#[test_log::test]
fn projection_preserves_feasible_points() -> Result<()> {
    // { [i, j] : 0 <= i <= 10 and i <= j <= i + 2 } projected on i
    let space = Space::create_from_names(Some(&["i", "j"]), None, None, &[])?;
    let domain = BasicSet::universe(space.clone())?
        .add_constraints(&band(&space, "i", 0, 10)?)?
        .add_constraint(&Constraint::ineq_from_names(
            space.clone(),
            [("j".into(), 1), ("i".into(), -1)],
        )?)?
        .add_constraint(&Constraint::ineq_from_names(
            space.clone(),
            [("i".into(), 1), ("j".into(), -1), (CoeffKey::Constant, 2)],
        )?)?;

    let on_i = domain.project_out_except(&["i"], &[DimType::SET])?;
    assert!(on_i.contains(&[0], &[]));
    assert!(on_i.contains(&[10], &[]));
    assert!(!on_i.contains(&[11], &[]));
    assert!(!on_i.contains(&[-1], &[]));
    Ok(())
}

#[test]
fn absent_keep_names_are_ignored() -> Result<()> {
    let space = Space::create_from_names(Some(&["i"]), None, None, &[])?;
    let domain = BasicSet::universe(space)?;
    // "ghost" never existed; "i" survives, nothing fails
    let projected = domain.project_out_except(&["i", "ghost"], &[DimType::SET])?;
    assert_eq!(projected.space().size(DimType::SET), 1);
    Ok(())
}

#[test]
fn upcast_equals_manual_promotion() -> Result<()> {
    let space = Space::create_from_names(Some(&["x"]), None, None, &[])?;
    let mut narrow = BasicSet::universe(space.clone())?;
    for c in band(&space, "x", 0, 3)? {
        narrow = narrow.add_constraint(&c)?;
    }
    let mut wide = BasicSet::universe(space.clone())?;
    for c in band(&space, "x", 10, 12)? {
        wide = wide.add_constraint(&c)?;
    }
    let other = Set::from_basic_set(wide);

    // BasicSet has no native union; the forward must match promote-then-call
    let forwarded = narrow.clone().union(other.clone())?;
    let manual = Set::from_basic_set(narrow).union(other)?;
    assert!(forwarded.is_equal(&manual));
    assert_eq!(forwarded.get_basic_sets().len(), 2);
    Ok(())
}

#[test]
fn add_constraints_order_does_not_matter() -> Result<()> {
    let space = Space::create_from_names(Some(&["x", "y"]), None, None, &[])?;
    let c1 = Constraint::ineq_from_names(space.clone(), [("x".into(), 1)])?;
    let c2 = Constraint::eq_from_names(
        space.clone(),
        [("y".into(), 1), ("x".into(), -1), (CoeffKey::Constant, -4)],
    )?;

    let fwd = BasicSet::universe(space.clone())?.add_constraints([&c1, &c2])?;
    let rev = BasicSet::universe(space)?.add_constraints([&c2, &c1])?;
    assert!(fwd.is_equal(&Set::from_basic_set(rev)));
    Ok(())
}

#[test]
fn projection_keeps_other_kinds_intact() -> Result<()> {
    // projecting set dims of a map leaves inputs and params alone
    let space = Space::create_from_names(None, Some(&["s", "t"]), Some(&["u", "v"]), &["N"])?;
    let relation = BasicMap::universe(space);
    let projected = relation.project_out_except(&["u"], &[DimType::Out])?;

    let dict = projected.space().var_dict(None)?;
    assert_eq!(dict["s"], (DimType::In, 0));
    assert_eq!(dict["t"], (DimType::In, 1));
    assert_eq!(dict["u"], (DimType::Out, 0));
    assert_eq!(dict["N"], (DimType::Param, 0));
    assert!(!dict.contains_key("v"));
    Ok(())
}

#[test]
fn map_domain_via_upcast() -> Result<()> {
    // { [i] -> [j] : j = i and 2 <= i <= 5 }
    let space = Space::create_from_names(None, Some(&["i"]), Some(&["j"]), &[])?;
    let identity = Constraint::eq_from_names(space.clone(), [("i".into(), 1), ("j".into(), -1)])?;
    let bmap = BasicMap::universe(space.clone())
        .add_constraint(&identity)?
        .add_constraints(&[
            Constraint::ineq_from_names(
                space.clone(),
                [("i".into(), 1), (CoeffKey::Constant, -2)],
            )?,
            Constraint::ineq_from_names(
                space,
                [("i".into(), -1), (CoeffKey::Constant, 5)],
            )?,
        ])?;

    let dom = bmap.domain()?;
    assert!(dom.contains(&[2], &[]));
    assert!(dom.contains(&[5], &[]));
    assert!(!dom.contains(&[6], &[]));
    Ok(())
}

#[test]
fn printable_types_render_names() -> Result<()> {
    let space = Space::create_from_names(Some(&["i", "j"]), None, None, &["N"])?;
    let c = Constraint::ineq_from_names(
        space.clone(),
        [("i".into(), -1), ("N".into(), 1), (CoeffKey::Constant, -1)],
    )?;
    let bset = BasicSet::universe(space)?.add_constraint(&c)?;
    assert_eq!(bset.to_string(), "[N] -> { [i, j] : -1 - i + N >= 0 }");
    Ok(())
}
