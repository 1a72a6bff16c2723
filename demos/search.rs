use betree::{AttributeDefinition, BETree};

fn main() {
    let attributes = [
        AttributeDefinition::bounded_integer("exchange_id", 0, 10),
        AttributeDefinition::string_list("deal_ids"),
    ];
    let mut tree = BETree::new(&attributes).unwrap();
    tree.insert(1, r#"deal_ids one of ["deal-1", "deal-2"]"#)
        .unwrap();
    tree.insert(2, r#"exchange_id = 5"#).unwrap();
    tree.insert(3, r#"exchange_id <> 5 and deal_ids none of ["deal-1"]"#)
        .unwrap();

    let mut builder = tree.make_event();
    builder.with_integer("exchange_id", 5).unwrap();
    builder
        .with_string_list("deal_ids", &["deal-3", "deal-1"])
        .unwrap();
    let event = builder.build().unwrap();

    let report = tree.search(&event);
    println!(
        "matched {:?} after evaluating {} expressions",
        report.matches(),
        report.evaluated()
    );
}
