mod refimpl;

use rutt::{
    path_cost, route, CartesianVertex, Diagonal, Euclidean, Graph, Heuristic, Taxicab, Tiebreaker,
    Weight,
};

use clap::{Parser, ValueEnum};
use movingai::{Coords2D, Map2D as _};
use movingai::{MovingAiMap, SceneRecord};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Estimate {
    /// Over-estimates on these maps since diagonal moves are allowed
    Taxicab,
    Diagonal,
    Euclidean,
}

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// The path to a .scen file from moving AI, or a directory of .scen files
    scenario: PathBuf,
    /// Maps directory
    #[arg(long)]
    maps: PathBuf,
    /// Distance estimate used to order the search
    #[arg(long, value_enum, default_value = "euclidean")]
    estimate: Estimate,
    /// Cross-product tie-break increment added to the estimate
    #[arg(long)]
    tiebreak: Option<Weight>,
}

const DIAG_COST: Weight = std::f32::consts::SQRT_2;
const STRAIGHT_COST: Weight = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Tile(Coords2D);

impl CartesianVertex for Tile {
    fn x(&self) -> Weight {
        self.0 .0 as Weight
    }

    fn y(&self) -> Weight {
        self.0 .1 as Weight
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Move {
    from: Coords2D,
    to: Coords2D,
}

fn neighbors(map: &MovingAiMap, tile: Coords2D) -> Vec<Coords2D> {
    let (x, y) = (tile.0 as isize, tile.1 as isize);
    let all = [
        (x + 1, y),
        (x + 1, y + 1),
        (x + 1, y - 1),
        (x, y + 1),
        (x, y - 1),
        (x - 1, y),
        (x - 1, y - 1),
        (x - 1, y + 1),
    ];
    all.into_iter()
        .filter(|&(x, y)| {
            x >= 0 && x < map.width() as isize && y >= 0 && y < map.height() as isize
        })
        .map(|(x, y)| (x as usize, y as usize))
        .filter(|&n| map.is_traversable_from(tile, n))
        .collect()
}

struct MapGraph {
    map: MovingAiMap,
    overrides: HashMap<(Coords2D, Coords2D), Weight>,
    estimate: Box<dyn Heuristic<Tile>>,
}

impl MapGraph {
    fn new(map: MovingAiMap, estimate: Box<dyn Heuristic<Tile>>) -> Self {
        Self {
            map,
            overrides: HashMap::new(),
            estimate,
        }
    }
}

impl Graph for MapGraph {
    type Vertex = Tile;
    type Edge = Move;

    fn outbound_edges(&self, from: &Tile) -> impl Iterator<Item = Move> {
        let from = from.0;
        neighbors(&self.map, from)
            .into_iter()
            .map(move |to| Move { from, to })
    }

    fn target(&self, edge: &Move) -> Tile {
        Tile(edge.to)
    }

    fn weight(&self, edge: &Move) -> Weight {
        if let Some(&w) = self.overrides.get(&(edge.from, edge.to)) {
            return w;
        }
        if edge.from.0 != edge.to.0 && edge.from.1 != edge.to.1 {
            DIAG_COST
        } else {
            STRAIGHT_COST
        }
    }

    fn set_weight(&mut self, edge: &Move, weight: Weight) {
        self.overrides.insert((edge.from, edge.to), weight);
    }

    fn heuristic(&self) -> &dyn Heuristic<Tile> {
        &*self.estimate
    }
}

fn build_estimate(kind: Estimate, tiebreak: Option<Weight>) -> Box<dyn Heuristic<Tile>> {
    let base: Box<dyn Heuristic<Tile>> = match kind {
        Estimate::Taxicab => Box::new(Taxicab),
        Estimate::Diagonal => Box::new(Diagonal),
        Estimate::Euclidean => Box::new(Euclidean),
    };
    match tiebreak {
        Some(incr) => Box::new(Tiebreaker::new(incr, base)),
        None => base,
    }
}

fn parse_scenario_file(file: &Path) -> (Vec<SceneRecord>, String) {
    let scenarios = movingai::parser::parse_scen_file(file).unwrap();
    let first_map = scenarios[0].map_file.clone();
    assert!(
        scenarios.iter().all(|s| s.map_file == first_map),
        "All maps are not the same as {first_map} in {scenario}",
        scenario = file.display()
    );
    (scenarios, first_map)
}

fn run_scenarios(scen_path: &Path, cli: &Cli) {
    let (scenarios, map_file) = parse_scenario_file(scen_path);
    let mut map_path = cli.maps.clone();
    map_path.push(&map_file);
    let map = movingai::parser::parse_map_file(&map_path).unwrap();
    let graph = MapGraph::new(map, build_estimate(cli.estimate, cli.tiebreak));

    println!("Scenario count: {}", scenarios.len());
    let pg = indicatif::ProgressBar::new(scenarios.len() as u64);
    let mut mismatches = 0usize;
    for (idx, scenario) in scenarios.iter().enumerate() {
        pg.inc(1);
        let path = route(&graph, &Tile(scenario.start_pos), &Tile(scenario.goal_pos));
        let cost = path_cost(&graph, &path) as f64;
        let expected = scenario.optimal_length;
        if (expected - cost).abs() > 0.001 {
            mismatches += 1;
            let reference =
                refimpl::shortest_path_cost(&graph.map, scenario.start_pos, scenario.goal_pos);
            pg.println(format!(
                "[{}/{}] cost mismatch. Start: {:?}, End: {:?}. Scenario says {}, route found {}, reference found {:?}",
                idx,
                scenarios.len(),
                scenario.start_pos,
                scenario.goal_pos,
                expected,
                cost,
                reference,
            ));
        }
    }
    pg.finish();
    if mismatches > 0 {
        println!("{mismatches} scenario(s) did not match their recorded optimal length");
    }
}

fn main() {
    let cli = Cli::parse();
    let start = std::time::Instant::now();
    if cli.scenario.is_dir() {
        let itr = std::fs::read_dir(&cli.scenario).expect("Failed to read directory contents");
        for entry in itr {
            let entry = entry.expect("Failed to read path");
            if entry.file_name().to_str().unwrap().ends_with(".scen") {
                println!("Running scenarios in {}", entry.path().display());
                run_scenarios(&entry.path(), &cli);
            }
        }
    } else {
        run_scenarios(&cli.scenario, &cli);
    }
    println!("Took {} s to run", start.elapsed().as_secs_f32());
}
