use std::error::Error;
use std::fs::File;

/**
 * File: /src/config.rs
 * Created Date: Friday, January 26th 2024
 * Author: Zihan
 * -----
 * Last Modified: Monday, 19th October 2026 11:20:13 am
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-19		Zihan	Command line config for the PaCo binary
 */
use ndarray::Array2;
use ndarray_npy::ReadNpyExt;

use crate::paco::types::PacoConfig;

pub struct Config {
    // user x item interaction matrix, 0 = no interaction
    matrix: Array2<f64>,
    // shape of matrix
    row: usize,
    col: usize,
    paco: PacoConfig,
}

impl Config {
    /// constructor
    ///
    /// # Examples
    /// ```bash
    /// $ cargo run -- "data/interactions.npy" 5 5 0.008 42
    /// ```
    pub fn new(mut args: impl Iterator<Item = String>) -> Result<Config, Box<dyn Error>> {
        // args:
        // 0: program name
        // 1: matrix path (.npy, f64)
        // 2: row clusters
        // 3: column clusters
        // 4: density threshold
        // 5: seed (optional)
        args.next();
        let path = args.next().ok_or("missing matrix path")?;
        let reader = File::open(&path)?;
        let matrix = Array2::<f64>::read_npy(reader)?;
        let paco = Self::parse_params(args)?;
        Ok(Self::from_matrix(matrix, paco))
    }

    pub fn from_matrix(matrix: Array2<f64>, paco: PacoConfig) -> Config {
        let (row, col) = matrix.dim();
        Config {
            matrix,
            row,
            col,
            paco,
        }
    }

    /// `<k_row> <k_col> <density_low> [seed]`
    pub fn parse_params(mut args: impl Iterator<Item = String>) -> Result<PacoConfig, Box<dyn Error>> {
        let row_clusters = args.next().ok_or("missing row cluster count")?.parse::<usize>()?;
        let col_clusters = args.next().ok_or("missing column cluster count")?.parse::<usize>()?;
        let density_low = args.next().ok_or("missing density threshold")?.parse::<f64>()?;
        let mut paco = PacoConfig::new(row_clusters, col_clusters, density_low);
        if let Some(seed) = args.next() {
            paco = paco.with_seed(seed.parse::<u64>()?);
        }
        paco.validate()?;
        Ok(paco)
    }

    pub fn get_matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    pub fn get_paco(&self) -> &PacoConfig {
        &self.paco
    }

    pub fn get_row(&self) -> usize {
        self.row
    }

    pub fn get_col(&self) -> usize {
        self.col
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray_npy::write_npy;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_new_config() {
        let path = std::env::temp_dir().join("paco_config_test_matrix.npy");
        let matrix = Array2::from_shape_fn((6, 4), |(i, j)| ((i + j) % 2) as f64);
        write_npy(&path, &matrix).unwrap();

        let config = Config::new(args(&[
            "target/debug/paco_cocluster",
            path.to_str().unwrap(),
            "3",
            "2",
            "1e-2",
            "7",
        ]))
        .unwrap();
        assert_eq!(config.get_row(), 6);
        assert_eq!(config.get_col(), 4);
        assert_eq!(config.get_matrix(), &matrix);
        assert_eq!(config.get_paco().row_clusters, 3);
        assert_eq!(config.get_paco().col_clusters, 2);
        assert_eq!(config.get_paco().density_low, 1e-2);
        assert_eq!(config.get_paco().seed, Some(7));
    }

    #[test]
    fn test_parse_params_without_seed() {
        let paco = Config::parse_params(args(&["4", "5", "0.008"])).unwrap();
        assert_eq!(paco.row_clusters, 4);
        assert_eq!(paco.col_clusters, 5);
        assert_eq!(paco.seed, None);
    }

    #[test]
    fn test_parse_params_errors() {
        assert!(Config::parse_params(args(&["4", "5"])).is_err());
        assert!(Config::parse_params(args(&["four", "5", "0.1"])).is_err());
        assert!(Config::parse_params(args(&["4", "5", "1.5"])).is_err());
        assert!(Config::new(args(&["prog"])).is_err());
        assert!(Config::new(args(&["prog", "/nonexistent/matrix.npy", "2", "2", "0.1"])).is_err());
    }
}
