//! 계산 로직을 라이브러리로 분리하여 CLI 외의 렌더링 계층에서도 재사용할 수 있게 한다.
//!
//! 핵심은 [`hydrology`]의 Rational Method 계산 엔진이며 I/O 없이 동작한다.
//! 지오코딩([`geocode`])과 설정([`config`])은 바깥 계층이다.

pub mod app;
pub mod config;
pub mod geocode;
pub mod hydrology;
pub mod report;
pub mod ui_cli;
pub mod units;
