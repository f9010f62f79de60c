//! Tests for ca-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, STATUS_FILE, SUMMARY_FILE};
    use crate::row::{AgentStatusRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn status_row(citizen_id: u32, tick: u64) -> AgentStatusRow {
        AgentStatusRow {
            citizen_id,
            tick,
            state:        "decide".into(),
            delay:        40,
            halted:       false,
            actions_done: citizen_id,
            managed:      3,
            status:       "herder.status.deciding".into(),
        }
    }

    fn summary_row(tick: u64) -> TickSummaryRow {
        TickSummaryRow { tick, elapsed_ms: tick * 50, ran: 2, delayed: 1, blocked: 0, failed: 0, halted: 0 }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join(STATUS_FILE).exists());
        assert!(dir.path().join(SUMMARY_FILE).exists());
    }

    #[test]
    fn missing_directory_is_created() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("first");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join(STATUS_FILE).exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(STATUS_FILE)).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["citizen_id", "tick", "state", "delay", "halted", "actions_done", "managed", "status"]);

        let mut rdr2 = csv::Reader::from_path(dir.path().join(SUMMARY_FILE)).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["tick", "elapsed_ms", "ran", "delayed", "blocked", "failed", "halted"]);
    }

    #[test]
    fn status_rows_written_in_order() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let mut halted = status_row(2, 5);
        halted.halted = true;
        halted.status.clear();
        w.write_status(&[status_row(0, 5), status_row(1, 5), halted]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(STATUS_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "0");
        assert_eq!(&rows[0][2], "decide");
        assert_eq!(&rows[0][7], "herder.status.deciding");
        assert_eq!(&rows[2][4], "1", "halted is written as 1");
        assert_eq!(&rows[2][7], "", "no status yet");
    }

    #[test]
    fn tick_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(3)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(SUMMARY_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "150");
        assert_eq!(&rows[0][2], "2");
        assert_eq!(&rows[0][3], "1");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use std::io;

    use ca_core::{CitizenId, SimConfig, Tick};
    use ca_fsm::{ActionError, FsmError};
    use ca_sim::{AgentSnapshot, SimObserver, TickSummary};

    use crate::{AgentStatusRow, OutputError, OutputResult, OutputWriter, StatusObserver, TickSummaryRow};

    /// Collects rows in memory; optionally refuses status writes.
    #[derive(Default)]
    struct Memory {
        status:    Vec<AgentStatusRow>,
        summaries: Vec<TickSummaryRow>,
        finished:  u32,
        broken:    bool,
    }

    impl OutputWriter for Memory {
        fn write_status(&mut self, rows: &[AgentStatusRow]) -> OutputResult<()> {
            if self.broken {
                return Err(OutputError::Io(io::Error::other("disk full")));
            }
            self.status.extend_from_slice(rows);
            Ok(())
        }

        fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
            self.summaries.push(*row);
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    fn snap(citizen: u32, status: Option<&str>) -> AgentSnapshot<&'static str> {
        AgentSnapshot {
            citizen:      CitizenId(citizen),
            state:        "work",
            delay:        0,
            halted:       false,
            actions_done: 1,
            managed:      4,
            status:       status.map(str::to_owned),
        }
    }

    fn config() -> SimConfig {
        SimConfig { tick_duration_ms: 50, ..SimConfig::default() }
    }

    #[test]
    fn summaries_carry_elapsed_time() {
        let mut obs = StatusObserver::new(Memory::default(), &config());
        let summary = TickSummary { ran: 1, delayed: 2, ..TickSummary::default() };
        SimObserver::<&'static str>::on_tick_end(&mut obs, Tick(4), &summary);

        let mem = obs.into_writer();
        assert_eq!(mem.summaries.len(), 1);
        assert_eq!(mem.summaries[0].elapsed_ms, 200);
        assert_eq!(mem.summaries[0].delayed, 2);
    }

    #[test]
    fn snapshots_become_rows() {
        let mut obs = StatusObserver::new(Memory::default(), &config());
        obs.on_snapshot(Tick(10), &[snap(0, Some("busy")), snap(3, None)]);
        assert_eq!(obs.rows_written(), 2);

        let mem = obs.into_writer();
        assert_eq!(mem.status[1].citizen_id, 3);
        assert_eq!(mem.status[1].tick, 10);
        assert_eq!(mem.status[0].state, "work");
        assert_eq!(mem.status[0].status, "busy");
        assert_eq!(mem.status[1].status, "");
        assert_eq!(mem.status[1].managed, 4);
    }

    #[test]
    fn first_write_error_is_kept() {
        let writer = Memory { broken: true, ..Memory::default() };
        let mut obs = StatusObserver::new(writer, &config());
        obs.on_snapshot(Tick(0), &[snap(0, None)]);
        obs.on_snapshot(Tick(1), &[snap(0, None)]);
        assert_eq!(obs.rows_written(), 0);
        assert!(matches!(obs.take_error(), Some(OutputError::Io(_))));
        assert!(obs.take_error().is_none());
    }

    #[test]
    fn agent_errors_are_counted() {
        let mut obs = StatusObserver::new(Memory::default(), &config());
        let err: FsmError<&'static str> =
            FsmError::Action { state: "work", source: ActionError::collaborator("world", "gone") };
        obs.on_agent_error(Tick(2), CitizenId(1), &err);
        obs.on_agent_error(Tick(3), CitizenId(1), &err);
        assert_eq!(obs.agent_errors(), 2);
    }

    #[test]
    fn sim_end_finishes_writer() {
        let mut obs = StatusObserver::new(Memory::default(), &config());
        SimObserver::<&'static str>::on_sim_end(&mut obs, Tick(9));
        assert_eq!(obs.into_writer().finished, 1);
    }
}

#[cfg(test)]
mod integration_tests {
    use ca_core::{BlockPos, BuildingId, CitizenId, SimConfig, ToolType};
    use ca_herd::{CreatureKind, Herdsman, Hut, Satchel, Shepherd, ShepherdConfig, Tool};
    use ca_sim::SimBuilder;
    use ca_world::Pasture;

    use crate::csv::{CsvWriter, STATUS_FILE, SUMMARY_FILE};
    use crate::StatusObserver;

    #[test]
    fn shepherds_write_status_csv() {
        let config = SimConfig { total_ticks: 6, seed: 1, tick_duration_ms: 50, snapshot_interval_ticks: 2 };
        let hut_pos = BlockPos::new(0, 64, 0);

        let mut pasture = Pasture::new(config.seed);
        pasture.scatter(CreatureKind::Sheep, hut_pos, 6, 4);

        let registry = Shepherd::registry::<Pasture, Satchel>(Shepherd::default_policy(), ShepherdConfig::default())
            .unwrap();
        let kit = || Satchel::new(9).with_tool(Tool::new(ToolType::Shears)).with_tool(Tool::new(ToolType::Axe));

        let mut builder = SimBuilder::new(config.clone(), pasture);
        for i in 0..2 {
            let hut = Hut::new(BuildingId(i), 1, hut_pos);
            let herdsman = Herdsman::new(CitizenId(i), hut, kit(), config.seed);
            builder = builder.agent(CitizenId(i), herdsman, registry.clone());
        }
        let mut sim = builder.build().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let mut obs = StatusObserver::new(CsvWriter::new(dir.path()).unwrap(), &config);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // snapshot interval 2 → ticks 0, 2, 4 × 2 citizens
        let mut rdr = csv::Reader::from_path(dir.path().join(STATUS_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 6);
        assert_eq!(&rows[0][0], "0");
        assert_eq!(&rows[1][0], "1");
        assert_eq!(&rows[0][2], "decide", "equipped shepherds leave preparing on the first tick");
        assert_eq!(&rows[0][4], "0");

        let mut rdr = csv::Reader::from_path(dir.path().join(SUMMARY_FILE)).unwrap();
        let summaries: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(summaries.len(), 6);
        assert_eq!(&summaries[3][1], "150");
        for row in &summaries {
            let counted: u64 = (2..7).map(|i| row[i].parse::<u64>().unwrap()).sum();
            assert_eq!(counted, 2, "every citizen is counted once per tick");
        }
    }
}

#[cfg(test)]
mod roster_tests {
    use ca_core::CitizenId;
    use ca_sim::AgentSnapshot;

    use crate::{CITIZENS_PER_PAGE, RosterPage};

    fn agents(n: u32) -> Vec<AgentSnapshot<&'static str>> {
        (0..n)
            .map(|i| AgentSnapshot {
                citizen:      CitizenId(i),
                state:        "decide",
                delay:        0,
                halted:       i == 1,
                actions_done: 0,
                managed:      0,
                status:       (i == 0).then(|| "herder.status.shearing".to_owned()),
            })
            .collect()
    }

    #[test]
    fn partial_last_page() {
        let all = agents(20);
        let first = RosterPage::new(&all, 1);
        assert_eq!(first.page_count, 3);
        assert_eq!(first.entries.len(), CITIZENS_PER_PAGE);
        assert!(!first.has_prev());
        assert!(first.has_next());

        let last = RosterPage::new(&all, 3);
        assert_eq!(last.entries.len(), 2);
        assert_eq!(last.entries[0].citizen, CitizenId(18));
        assert!(last.has_prev());
        assert!(!last.has_next());
    }

    #[test]
    fn exact_multiple_has_no_half_page() {
        let all = agents(18);
        assert_eq!(RosterPage::new(&all, 2).page_count, 2);
        assert_eq!(RosterPage::new(&all, 2).entries.len(), 9);
    }

    #[test]
    fn out_of_range_shows_first_page() {
        let all = agents(12);
        assert_eq!(RosterPage::new(&all, 0).page, 1);
        assert_eq!(RosterPage::new(&all, 7).page, 1);
        assert_eq!(RosterPage::new(&all, 7).entries[0].citizen, CitizenId(0));
    }

    #[test]
    fn empty_roster() {
        let none = agents(0);
        let page = RosterPage::new(&none, 1);
        assert_eq!((page.page, page.page_count), (1, 0));
        assert!(page.entries.is_empty());
        assert!(!page.has_next());
        assert_eq!(page.to_string().lines().count(), 1);
    }

    #[test]
    fn renders_header_and_lines() {
        let all = agents(3);
        let text = RosterPage::new(&all, 1).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("page 1 of 1"));
        assert!(lines[1].starts_with("ID: 0"));
        assert!(lines[1].ends_with("herder.status.shearing"));
        assert!(lines[2].contains("[halted]"));
    }
}
