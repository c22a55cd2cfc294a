/*
 * File: /main.rs
 * Created Date: Tuesday November 21st 2023
 * Author: Zihan
 * -----
 * Last Modified: Monday, 19th October 2026 11:31:07 am
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-19		Zihan	Run PaCo on a matrix loaded from .npy
 */
use std::env;
use std::process;
use std::time::Instant;

use log::{error, info, LevelFilter};
use paco_cocluster::config::Config;
use paco_cocluster::{init_logger, PacoCoclusterer};

fn main() {
    if let Err(e) = init_logger(LevelFilter::Info) {
        eprintln!("failed to install logger: {}", e);
    }

    let config = match Config::new(env::args()) {
        Ok(config) => config,
        Err(e) => {
            error!("Problem parsing arguments: {}", e);
            eprintln!(
                "usage: paco_cocluster <matrix.npy> <k_row> <k_col> <density_low> [seed]"
            );
            process::exit(1);
        }
    };
    info!(
        "Loaded {} x {} matrix",
        config.get_row(),
        config.get_col()
    );

    let start_time = Instant::now();
    let coclusterer = match PacoCoclusterer::new(config.get_paco().clone()) {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };
    match coclusterer.run(config.get_matrix()) {
        Ok(result) => {
            println!("{}", result.summary());
            info!("Time cost: {:?}", start_time.elapsed());
        }
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}
