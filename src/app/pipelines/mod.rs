pub mod overlap_pipeline;
