//! Basic example of tree-combination and trace enumeration

use tracegen::prelude::*;
use tracegen::utils::timing::Timer;

fn main() -> Result<()> {
    println!("=== Trace Enumeration ===\n");

    let graph = parse_dot(
        r#"
        digraph login {
            start -> form     [label="open"];
            form  -> home     [label="submit"];
            form  -> error    [label="reject"];
            error -> form     [label="retry"];
        }
        "#,
    )?;

    println!("Graph:");
    println!("{}", graph);

    // Subgraph combinations rooted at every vertex
    println!("\n--- Tree combinations ---");
    {
        let _timer = Timer::new("Tree combinations");
        let mut count = 0;
        graph.tree_combinations(|combination| {
            count += 1;
            if count <= 5 {
                println!("#{}:\n{}", count, combination);
            }
        });
        println!("{} combinations in total", count);
    }

    // Distinct traces, unbounded and windowed
    println!("\n--- Traces ---");
    let all = TraceSet::generate(&graph, None);
    for trace in all.iter() {
        println!("  {}", trace);
    }

    println!("\n--- Traces of length 2 ---");
    let window = DepthWindow::new(2, 2)?;
    for trace in TraceSet::generate(&graph, Some(window)).iter() {
        println!("  {}", trace);
    }

    println!("\n--- DOT export ---");
    println!("{}", to_dot(&graph));

    Ok(())
}
