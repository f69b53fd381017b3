use delta_route::{build_graph, export_graph, Algorithm, SharedGraph};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let graph = build_graph(vec![
        (1, 2, 10.0),
        (1, 3, 5.0),
        (2, 5, 15.0),
        (3, 2, 8.0),
        (3, 5, 20.0),
        (3, 4, 2.0),
        (4, 5, 10.0),
    ])?;

    println!("Graph has {} nodes and {} edges", graph.node_count(), graph.edge_count());
    for (from, to, weight) in export_graph(&graph) {
        println!("  {} -> {} ({:.2})", from, to, weight);
    }

    let shared = SharedGraph::new(graph);
    for (source, target) in [(1, 5), (1, 999), (5, 1)] {
        println!("\nQuery {} -> {}", source, target);
        for algorithm in Algorithm::ALL {
            let path = shared.find_shortest_path(algorithm, source, target)?;
            match path.total_distance {
                Some(cost) => println!("  {}: {} (cost {:.2})", path.algorithm, path, cost),
                None => println!("  {}: no path found", path.algorithm),
            }
            println!(
                "    polled {}, relaxations {}, stale {}",
                path.stats.polled, path.stats.relaxations, path.stats.stale_skips
            );
        }
    }

    Ok(())
}
