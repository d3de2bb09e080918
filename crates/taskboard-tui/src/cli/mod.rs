/*
[INPUT]:  Parsed subcommand arguments
[OUTPUT]: Headless subcommands of the taskboard binary
[POS]:    CLI layer
[UPDATE]: When adding subcommands
*/

pub mod init;
pub mod list;
