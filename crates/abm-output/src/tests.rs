//! Integration tests for abm-output.

#[cfg(test)]
mod csv_tests {
    use abm_behavior::AgentRow;
    use tempfile::TempDir;

    use crate::csv::{AGENT_REPORTS_FILE, CsvWriter, MODEL_REPORTS_FILE};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn agent_row(agent_id: u32, tick: u64) -> AgentRow {
        AgentRow {
            tick,
            agent_id,
            role:     "RegularPerson",
            informed: agent_id == 0,
            x:        Some(agent_id),
            y:        Some(1),
            counter:  3,
        }
    }

    fn read(path: std::path::PathBuf) -> (Vec<String>, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path(), &["tick", "informed"]).unwrap();
        assert!(dir.path().join(MODEL_REPORTS_FILE).exists());
        assert!(dir.path().join(AGENT_REPORTS_FILE).exists());
    }

    #[test]
    fn missing_directory_is_created() {
        let dir = tmp();
        let nested = dir.path().join("a").join("b");
        let _w = CsvWriter::new(&nested, &["tick"]).unwrap();
        assert!(nested.join(MODEL_REPORTS_FILE).exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path(), &["tick", "infected"]).unwrap();
        w.finish().unwrap();

        let (headers, _) = read(dir.path().join(MODEL_REPORTS_FILE));
        assert_eq!(headers, ["tick", "infected"]);

        let (headers, _) = read(dir.path().join(AGENT_REPORTS_FILE));
        assert_eq!(headers, ["tick", "agent_id", "role", "informed", "x", "y", "counter"]);
    }

    #[test]
    fn agent_rows_written_in_order() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path(), &["tick"]).unwrap();
        w.write_agent_rows(&[agent_row(0, 5), agent_row(1, 5)]).unwrap();
        w.finish().unwrap();

        let (_, rows) = read(dir.path().join(AGENT_REPORTS_FILE));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "5"); // tick
        assert_eq!(&rows[0][1], "0"); // agent_id
        assert_eq!(&rows[0][3], "1"); // informed
        assert_eq!(&rows[1][1], "1");
        assert_eq!(&rows[1][3], "0");
    }

    #[test]
    fn non_spatial_agent_has_empty_coordinates() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path(), &["tick"]).unwrap();
        let influencer = AgentRow { role: "Influencer", x: None, y: None, ..agent_row(7, 0) };
        w.write_agent_rows(&[influencer]).unwrap();
        w.finish().unwrap();

        let (_, rows) = read(dir.path().join(AGENT_REPORTS_FILE));
        assert_eq!(&rows[0][2], "Influencer");
        assert_eq!(&rows[0][4], "");
        assert_eq!(&rows[0][5], "");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path(), &["tick"]).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_agent_batch_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path(), &["tick"]).unwrap();
        w.write_agent_rows(&[]).unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use abm_agent::{Person, PopulationBuilder};
    use abm_behavior::{
        AgentRow, DiseaseModel, DiseaseParams, ReportRow, TrendModel, TrendParams, TrendReport,
    };
    use abm_core::{AgentId, SimConfig, Tick};
    use abm_grid::{Coord, Grid};
    use abm_sim::SimBuilder;

    use crate::csv::{AGENT_REPORTS_FILE, CsvWriter, MODEL_REPORTS_FILE};
    use crate::observer::SimOutputObserver;
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    fn config(max_ticks: u64, output_interval_ticks: u64) -> SimConfig {
        SimConfig { seed: 1, max_ticks, output_interval_ticks, num_threads: Some(1) }
    }

    fn count_rows(path: std::path::PathBuf) -> usize {
        csv::Reader::from_path(path).unwrap().records().count()
    }

    /// Nobody can get infected, so the run never stops early.
    fn harmless() -> DiseaseParams {
        DiseaseParams {
            direct_prob: 0.0,
            direct_prob_comorbid: 0.0,
            contaminated_cell_prob: 0.0,
            adjacent_cell_prob: 0.0,
            comorbid_location_bonus: 0.0,
            ..DiseaseParams::default()
        }
    }

    #[test]
    fn snapshots_every_interval() {
        let mut sim = SimBuilder::<DiseaseModel>::new(config(6, 2), harmless()).build().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let writer = CsvWriter::for_model::<DiseaseModel>(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // output_interval = 2 → snapshots at 0, 2, 4 with 10 agents each,
        // plus the final model row at tick 6
        assert_eq!(count_rows(dir.path().join(MODEL_REPORTS_FILE)), 4);
        assert_eq!(count_rows(dir.path().join(AGENT_REPORTS_FILE)), 30);
    }

    #[test]
    fn final_state_written_when_ticks_run_out() {
        let mut sim = SimBuilder::<DiseaseModel>::new(config(3, 1), harmless()).build().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let writer = CsvWriter::for_model::<DiseaseModel>(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer).without_agent_rows();
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());
        assert_eq!(sim.clock, Tick(3));

        let mut rdr = csv::Reader::from_path(dir.path().join(MODEL_REPORTS_FILE)).unwrap();
        let ticks: Vec<String> = rdr.records().map(|r| r.unwrap()[0].to_owned()).collect();
        assert_eq!(ticks, ["0", "1", "2", "3"]);
    }

    #[test]
    fn stop_writes_final_model_row() {
        let params = TrendParams {
            population_size: 4,
            sport_enthusiasts: Some(0),
            grid_width: 1,
            grid_height: 1,
            gossip_prob: 1.0,
            skepticism_prob: 0.0,
            ..TrendParams::default()
        };
        let mut sim = SimBuilder::<TrendModel>::new(config(50, 1), params).build().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let writer = CsvWriter::for_model::<TrendModel>(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer).without_agent_rows();
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join(MODEL_REPORTS_FILE)).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, TrendReport::headers());
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        // snapshot at tick 0, stop row at tick 1
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "0");
        assert_eq!(&rows[0][1], "1"); // informed
        assert_eq!(&rows[1][0], "1");
        assert_eq!(&rows[1][1], "5");
        assert_eq!(&rows[1][2], "0"); // uninformed

        assert_eq!(count_rows(dir.path().join(AGENT_REPORTS_FILE)), 0);
    }

    /// Fails every write after the first `ok` model rows.
    struct Flaky {
        ok:    usize,
        calls: usize,
    }

    impl OutputWriter for Flaky {
        fn write_model_report(&mut self, _fields: &[String]) -> OutputResult<()> {
            self.calls += 1;
            if self.calls > self.ok {
                Err(OutputError::Io(std::io::Error::other(format!("write {}", self.calls))))
            } else {
                Ok(())
            }
        }
        fn write_agent_rows(&mut self, _rows: &[AgentRow]) -> OutputResult<()> {
            Ok(())
        }
        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_error_is_kept() {
        let population = PopulationBuilder::new().person(Person::default().with_moving_prob(0.0)).build();
        let mut grid = Grid::new(1, 1, true).unwrap();
        grid.place(AgentId(0), Coord::new(0, 0)).unwrap();
        let model = TrendModel::from_parts(TrendParams::default(), population, grid);
        let mut sim = SimBuilder::from_model(config(4, 1), model).unwrap();

        let mut obs = SimOutputObserver::new(Flaky { ok: 1, calls: 0 });
        sim.run(&mut obs).unwrap();

        let err = obs.take_error().expect("stored error");
        assert_eq!(err.to_string(), "I/O error: write 2");
        assert!(obs.take_error().is_none());
        // snapshots at ticks 0..=3, then the final row at tick 4
        assert_eq!(obs.into_writer().calls, 5);
    }
}

#[cfg(test)]
mod batch_csv_tests {
    use abm_behavior::{ReportRow, TrendModel, TrendParams, TrendReport};
    use abm_sim::{BatchSettings, expand_jobs, run_batch};

    use crate::write_batch_records;

    #[test]
    fn batch_records_carry_run_and_parameter_columns() {
        let sets = [
            TrendParams { population_size: 3, ..TrendParams::default() },
            TrendParams { population_size: 4, sport_facilities: 2, ..TrendParams::default() },
        ];
        let jobs = expand_jobs(&sets, 2, 3);
        let settings = BatchSettings { max_ticks: 4, collection_period: 2, num_threads: Some(1) };
        let records = run_batch::<TrendModel>(&jobs, &settings).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("batch.csv");
        write_batch_records(&path, &records).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let params = TrendParams::headers().len();
        assert_eq!(headers.len(), 2 + params + TrendReport::headers().len());
        assert_eq!(&headers[..3], ["run_id", "iteration", "population_size"]);
        assert_eq!(headers[2 + params], "tick");

        let col = |name: &str| headers.iter().position(|h| h == name).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), records.len());
        for (row, record) in rows.iter().zip(&records) {
            assert_eq!(row[col("run_id")], record.run_id.to_string());
            assert_eq!(
                row[col("population_size")],
                record.params.population_size.to_string()
            );
            assert_eq!(
                row[col("sport_facilities")],
                record.params.sport_facilities.to_string()
            );
            assert_eq!(&row[col("sport_enthusiasts")], "");
            assert_eq!(&row[col("channel")], "random_followers");
        }
    }
}
