//! Circuit, connection and builder integration tests.

use approx::assert_relative_eq;
use cdc_core::{
    known_elements, parse, BuilderError, Circuit, CircuitBuilder, Connection, ConnectionError, Element, ElementKind,
    Node, NodeRef,
};

fn resistor(ohms: f64) -> Element {
    Element::with_values(ElementKind::Resistor, &[("R", ohms)]).unwrap()
}

#[test]
fn test_element_registry() {
    let symbols: Vec<&str> = known_elements().into_iter().map(ElementKind::symbol).collect();
    assert_eq!(
        symbols,
        vec!["R", "C", "L", "La", "Q", "W", "Ws", "Wo", "Ls", "G", "H", "Ha"]
    );
}

#[test]
fn test_parse_every_element() {
    for kind in known_elements() {
        let circuit = parse(kind.symbol()).unwrap();
        let elements = circuit.get_elements(true);
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].as_element().unwrap().kind(), kind);
        assert_eq!(circuit.to_string(), format!("[{}]", kind.symbol()));
    }
}

#[test]
fn test_series_identity() {
    let series = Connection::series(vec![resistor(250.0).into(), resistor(500.0).into()]).unwrap();
    assert_relative_eq!(series.impedance(1.0).re, 750.0);

    let circuit = parse("R{R=250}R{R=500}").unwrap();
    let z = circuit.impedance(1.0);
    assert_relative_eq!(z.re, 750.0);
    assert_relative_eq!(z.im, 0.0);
}

#[test]
fn test_parallel_identity() {
    let expected = 1.0 / (1.0 / 250.0 + 1.0 / 500.0);

    let parallel = Connection::parallel(vec![resistor(250.0).into(), resistor(500.0).into()]).unwrap();
    assert_relative_eq!(parallel.impedance(1.0).re, expected);

    let circuit = parse("(R{R=250}R{R=500})").unwrap();
    assert_relative_eq!(circuit.impedance(1.0).re, expected, max_relative = 1e-12);
}

#[test]
fn test_zero_branch_shorts_parallel() {
    let circuit = parse("(R{R=0}C)").unwrap();
    let expr = circuit.to_symbolic(true);
    for f in [1e-5, 1.0, 1e5] {
        let z = circuit.impedance(f);
        assert_eq!((z.re, z.im), (0.0, 0.0));
        let symbolic = expr.evaluate_at("f", f).unwrap();
        assert_eq!((symbolic.re, symbolic.im), (0.0, 0.0));
    }

    let circuit = parse("(R{R=0}R{R=5})").unwrap();
    assert_relative_eq!(circuit.impedance(1.0).re, 0.0);
}

#[test]
fn test_get_elements() {
    let circuit = parse("(RCQ)").unwrap();
    let top = circuit.get_elements(false);
    assert_eq!(top.len(), 1);
    assert!(matches!(top[0], NodeRef::Connection(c) if c.is_series()));

    let kinds: Vec<ElementKind> = circuit.flattened_elements().iter().map(|e| e.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            ElementKind::Resistor,
            ElementKind::Capacitor,
            ElementKind::ConstantPhaseElement
        ]
    );

    let circuit = parse("R(RC)(RW)").unwrap();
    let root = circuit.get_elements(false)[0].as_connection().unwrap();
    let children = root.get_elements(false);
    assert_eq!(children.len(), 3);
    assert!(children[0].as_element().is_some());
    assert!(children[1].as_connection().is_some_and(|c| c.is_parallel()));
    assert!(children[2].as_connection().is_some_and(|c| c.is_parallel()));

    let symbols: Vec<&str> = circuit.flattened_elements().iter().map(|e| e.get_symbol()).collect();
    assert_eq!(symbols, vec!["R", "R", "C", "R", "W"]);
    assert_eq!(circuit.get_element(0).unwrap().kind(), ElementKind::Resistor);
    assert_eq!(circuit.get_element(4).unwrap().kind(), ElementKind::Warburg);
    assert_eq!(circuit.get_element(4), Some(circuit.flattened_elements()[4]));
    assert!(circuit.get_element(5).is_none());
}

#[test]
fn test_get_connections() {
    let circuit = parse("(RCQ)").unwrap();
    assert_eq!(circuit.get_connections(false).len(), 1);
    assert_eq!(circuit.get_connections(true).len(), 2);

    let circuit = parse("R(RC)(RW)").unwrap();
    assert_eq!(circuit.get_connections(false).len(), 1);
    let all = circuit.get_connections(true);
    assert_eq!(all.len(), 3);
    assert_eq!(all[1].to_string(), "(RC)");
    assert_eq!(circuit.get_connection(2).unwrap().to_string(), "(RW)");
}

#[test]
fn test_mutation_through_queries() {
    let mut circuit = parse("R(RC)").unwrap();
    circuit.get_element_mut(1).unwrap().set_value("R", 10.0).unwrap();
    for element in circuit.elements_mut() {
        if element.kind() == ElementKind::Capacitor {
            element.set_fixed("C", true).unwrap();
        }
    }
    let parallel = circuit.get_connection_mut(1).unwrap();
    parallel.get_element_mut(1).unwrap().set_label("dl").unwrap();

    assert_eq!(
        circuit.to_cdc(Some(1)),
        "[R{R=1.0E+03}(R{R=1.0E+01}C{C=1.0E-06F:dl})]"
    );
}

#[test]
fn test_labels_follow_identifiers() {
    let element = Element::new(ElementKind::ConstantPhaseElement);
    assert_eq!(element.get_identifier(), -1);
    assert_eq!(element.get_label(), "Q");

    let circuit = parse("Q(RQ{Y=1e-5:test})").unwrap();
    let labels: Vec<String> = circuit.flattened_elements().iter().map(|e| e.get_label()).collect();
    assert_eq!(labels, vec!["Q_1", "R_1", "Q_test"]);
    assert_eq!(circuit.get_element(2).unwrap().get_default_label(), "Q_2");
    assert!(circuit.symbol_values().contains_key("Y_Q_test"));
}

#[test]
fn test_builder_series() {
    let mut builder = CircuitBuilder::new();
    builder.add(Element::new(ElementKind::Resistor));
    builder.add(Element::new(ElementKind::Capacitor));
    assert_eq!(builder.finish().unwrap().to_string(), "[RC]");

    let mut builder = CircuitBuilder::new();
    builder += Element::new(ElementKind::Resistor);
    builder += Element::new(ElementKind::Capacitor);
    assert_eq!(builder.finish().unwrap().to_string(), "[RC]");

    assert!(matches!(
        CircuitBuilder::new().finish(),
        Err(BuilderError::Connection(ConnectionError::Empty { .. }))
    ));
}

#[test]
fn test_builder_parallel() {
    let mut builder = CircuitBuilder::new_parallel();
    builder += Element::new(ElementKind::Resistor);
    builder += Element::new(ElementKind::Capacitor);
    assert_eq!(builder.finish().unwrap().to_string(), "[(RC)]");

    let mut builder = CircuitBuilder::new_parallel();
    builder += Element::new(ElementKind::Resistor);
    assert_eq!(
        builder.finish().err(),
        Some(BuilderError::Connection(ConnectionError::InsufficientBranches { count: 1 }))
    );

    assert!(CircuitBuilder::new_parallel().finish().is_err());
}

#[test]
fn test_builder_nested_connections() {
    let mut builder = CircuitBuilder::new();
    builder += ElementKind::Resistor.create();
    builder
        .parallel(|p| {
            p.add(ElementKind::Capacitor.create());
            p.add(ElementKind::Resistor.create());
            Ok(())
        })
        .unwrap();
    assert_eq!(builder.finish().unwrap().to_string(), "[R(CR)]");

    let mut builder = CircuitBuilder::new();
    builder
        .parallel(|p| {
            *p += ElementKind::Capacitor.create();
            *p += ElementKind::Resistor.create();
            Ok(())
        })
        .unwrap();
    builder += ElementKind::Resistor.create();
    assert_eq!(builder.finish().unwrap().to_string(), "[(CR)R]");

    let mut builder = CircuitBuilder::new();
    builder
        .parallel(|p| {
            p.series(|s| {
                s.add(ElementKind::Resistor.create());
                s.add(ElementKind::Capacitor.create());
                Ok(())
            })?;
            p.add(ElementKind::Resistor.create());
            Ok(())
        })
        .unwrap();
    assert_eq!(builder.finish().unwrap().to_string(), "[([RC]R)]");
}

#[test]
fn test_builder_parameters_and_labels() {
    let cdc = "[R{R=8.3E+01/2.0E+01/9.6E+01:test}C{C=4.0E-03F}]";

    let mut r = resistor(83.0);
    r.set_lower_limit("R", 20.0).unwrap();
    r.set_upper_limit("R", 96.0).unwrap();
    r.set_label("test").unwrap();
    let mut c = Element::with_values(ElementKind::Capacitor, &[("C", 4e-3)]).unwrap();
    c.set_fixed("C", true).unwrap();

    let mut builder = CircuitBuilder::new();
    builder.add(r).add(c);
    assert_eq!(builder.finish().unwrap().to_cdc(Some(1)), cdc);

    let mut builder = CircuitBuilder::new();
    builder += resistor(83.0)
        .set_lower_limit("R", 20.0)
        .and_then(|r| r.set_upper_limit("R", 96.0))
        .and_then(|r| r.set_label("test"))
        .unwrap()
        .clone();
    builder += Element::with_values(ElementKind::Capacitor, &[("C", 4e-3)])
        .unwrap()
        .set_fixed("C", true)
        .unwrap()
        .clone();
    let circuit = builder.finish().unwrap();
    assert_eq!(circuit.to_cdc(Some(1)), cdc);
    assert_eq!(parse(cdc).unwrap(), circuit);
}

#[test]
fn test_builder_matches_parser() {
    let inner = Connection::series(vec![
        Node::from(ElementKind::Warburg.create()),
        Connection::parallel(vec![
            ElementKind::Inductor.create().into(),
            ElementKind::ConstantPhaseElement.create().into(),
        ])
        .unwrap()
        .into(),
    ])
    .unwrap();

    let mut builder = CircuitBuilder::new();
    builder += ElementKind::Resistor.create();
    builder.open_parallel();
    builder += ElementKind::Capacitor.create();
    builder += inner;
    builder.close().unwrap();
    let built: Circuit = builder.finish().unwrap();

    let parsed = parse("R(C[W(LQ)])").unwrap();
    assert_eq!(built, parsed);
    for f in [1e-3, 1.0, 1e3] {
        assert_relative_eq!(built.impedance(f).re, parsed.impedance(f).re);
        assert_relative_eq!(built.impedance(f).im, parsed.impedance(f).im);
    }
}
