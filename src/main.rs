#![allow(non_snake_case)]
use RustedMDE::Utils::logger::{init_logging, load_data_csv, save_trails_to_csv};
use RustedMDE::Utils::plots::plot_trails;
use RustedMDE::Utils::settings::MdeSettings;
use RustedMDE::Utils::summary_table::{features_table, solutions_table};
use RustedMDE::analysis::analyzed_item::AnalyzedItemEnum;
use RustedMDE::solver::solver::Solver;
use log::{error, info};

/// usage: RustedMDE [example number] [settings or data file]
fn main() {
    let args: Vec<String> = std::env::args().collect();
    let example: usize = args.get(1).and_then(|a| a.parse().ok()).unwrap_or(0);
    let file = args.get(2).cloned();

    let settings = match (example, &file) {
        (3, Some(path)) => MdeSettings::from_file(path).unwrap_or_else(|e| {
            eprintln!("{}; using default settings", e);
            MdeSettings::default()
        }),
        _ => MdeSettings::default(),
    };
    init_logging(&settings.log_level, settings.log_file.as_deref());
    let mut solver = Solver::with_settings(settings);

    match example {
        0 => {
            // CARTESIAN CURVES
            for eq in [
                "y = x^2 - 4",
                "x^2/25 + y^2/9 = 1",
                "x^2 - y^2 = 1",
                "(x-2*y+1)*(2*x+y+1) = 0",
                "y = 3*sin(2*x - 1) + 1",
                "y = x^3 - 3*x",
            ] {
                if let Err(e) = solver.add_equation(eq) {
                    error!("{}", e);
                }
            }
        }
        1 => {
            // POLAR CURVES
            for eq in ["r = 2*cos(3*theta)", "r = 1 + 2*cos(theta)", "r^2 = 4*cos(2*theta)"] {
                if let Err(e) = solver.add_equation(eq) {
                    error!("{}", e);
                }
            }
        }
        2 => {
            // DATA FROM A CSV FILE
            let Some(path) = file else {
                eprintln!("example 2 needs a two-column csv file");
                return;
            };
            match load_data_csv(&path) {
                Ok(data) => {
                    if let Err(e) = solver.add_item(AnalyzedItemEnum::Data(data)) {
                        error!("{}", e);
                    }
                }
                Err(e) => {
                    eprintln!("{}", e);
                    return;
                }
            }
        }
        3 => {
            // PARAMETERS FROM THE SETTINGS FILE
            let _ = solver.add_equation("y = a*x^2 + b*x + c");
            let _ = solver.add_equation("y = m*x + k");
        }
        _ => {
            eprintln!("examples are 0 (Cartesian), 1 (polar), 2 (csv data), 3 (settings)");
            return;
        }
    }

    let b = solver.bounds();
    solver.solve(b.left, b.right, b.top, b.bottom);
    println!("{}", solutions_table(&solver));
    for (i, s) in solver.solutions().enumerate() {
        if let Some(g) = s.features() {
            println!("\n{}: {}\n{}", i, s.name(), features_table(g));
            info!("{}", g.to_xml());
        }
    }

    let items: Vec<(String, Vec<_>)> = solver
        .solutions()
        .filter(|s| s.is_show_graph())
        .map(|s| (s.name(), s.graph_trails().to_vec()))
        .collect();
    let filename = format!("mde_example_{}.png", example);
    match plot_trails(&items, &solver.bounds(), "x", "y", &filename) {
        Ok(()) => println!("plot saved to {}", filename),
        Err(e) => error!("plot not saved: {}", e),
    }
    if let Some((name, trails)) = items.first() {
        let csv_name = format!("mde_example_{}_trails.csv", example);
        if let Err(e) = save_trails_to_csv(trails, "x", name, &csv_name) {
            error!("trails not saved: {}", e);
        }
    }
}
