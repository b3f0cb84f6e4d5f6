use anyhow::Result;
use chrono::NaiveDate;
use pair_overlap::adapters::discovery::discover_input;
use pair_overlap::config::toml_config::TomlConfig;
use pair_overlap::utils::validation::Validate;
use pair_overlap::{AnalysisConfig, AnalysisEngine, LocalStorage, OverlapError, OverlapPipeline};
use tempfile::TempDir;

const ASSIGNMENTS: &str = "\
EmpID, ProjectID, DateFrom, DateTo
143, 12, 2013-11-01, 2014-01-05
218, 10, 2012-05-16, NULL
143, 10, 2009-01-01, 2011-04-27
218, 12, 2013/12/01, 20140201
";

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

fn config_for(dir: &TempDir) -> AnalysisConfig {
    let mut config = AnalysisConfig::new(reference_date());
    config.input_path = "assignments.csv".to_string();
    config.has_headers = true;
    config.data_dir = dir.path().to_string_lossy().into_owned();
    config
}

#[tokio::test]
async fn test_end_to_end_text_report() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("assignments.csv"), ASSIGNMENTS)?;
    let config = config_for(&temp_dir);
    config.validate()?;

    let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());
    let engine = AnalysisEngine::new_with_monitoring(OverlapPipeline::new(storage, config), false);

    let output = engine.run().await?;

    // project 10 never overlaps (2011-04-27 < 2012-05-16); project 12 gives 35 days
    assert_eq!(
        output,
        "Employees which have worked the longest together are with IDs 143 and 218 with 35 days.\n\
         Common projects for the longest working pair:\n\
         Employee ID #1, Employee ID #2, Project ID, Days Worked\n\
         143, 218, 12, 35\n"
    );
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_json_to_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("assignments.csv"), ASSIGNMENTS)?;
    let mut config = config_for(&temp_dir);
    config.output_format = "json".to_string();
    config.output_path = Some("reports/longest.json".to_string());

    let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());
    let engine = AnalysisEngine::new(OverlapPipeline::new(storage, config));

    let message = engine.run().await?;

    assert_eq!(message, "Report saved to: reports/longest.json");
    let written = std::fs::read_to_string(temp_dir.path().join("reports/longest.json"))?;
    let json: serde_json::Value = serde_json::from_str(&written)?;
    assert_eq!(json["status"], "winner");
    assert_eq!(json["total_overlap_days"], 35);
    assert_eq!(json["shared_projects"][0]["project_id"], 12);
    assert_eq!(json["shared_projects"][0]["overlap_days"], 35);
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_no_overlap() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("assignments.csv"),
        "EmpID,ProjectID,DateFrom,DateTo\n1,10,2023-01-01,2023-01-05\n2,10,2023-01-05,2023-01-10\n",
    )?;

    let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());
    let engine = AnalysisEngine::new(OverlapPipeline::new(storage, config_for(&temp_dir)));

    assert_eq!(engine.run().await?, "No 2 employees have worked together.\n");
    Ok(())
}

#[tokio::test]
async fn test_malformed_row_fails_with_line() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("assignments.csv"),
        "EmpID,ProjectID,DateFrom,DateTo\n1,10,2023-01-01,2023-01-05\n2,ten,2023-01-05,2023-01-10\n",
    )?;

    let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());
    let engine = AnalysisEngine::new(OverlapPipeline::new(storage, config_for(&temp_dir)));

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, OverlapError::InvalidRecord { line: 3, .. }));
    Ok(())
}

#[test]
fn test_discovery_then_toml_config() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("a.csv"), ASSIGNMENTS)?;
    std::fs::write(temp_dir.path().join("b.csv"), ASSIGNMENTS)?;
    let toml_path = temp_dir.path().join("overlap.toml");
    std::fs::write(
        &toml_path,
        format!(
            "[input]\ndata_dir = \"{}\"\nhas_headers = true\n\n[analysis]\nreference_date = \"2020-01-01\"\n",
            temp_dir.path().to_string_lossy().replace('\\', "/")
        ),
    )?;

    let mut config = TomlConfig::from_file(&toml_path)?
        .into_analysis_config(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap())?;
    assert_eq!(config.reference_date, reference_date());

    let mut prompt = Vec::new();
    let chosen = discover_input(std::path::Path::new(&config.data_dir), "2\n".as_bytes(), &mut prompt)?;
    config.input_path = chosen.to_string_lossy().into_owned();

    assert!(chosen.ends_with("b.csv"));
    assert!(String::from_utf8(prompt)?.contains("1. a.csv"));
    config.validate()?;
    Ok(())
}
