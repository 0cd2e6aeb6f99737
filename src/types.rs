// src/types.rs

// 交互模式下的绘图模式（单选按钮）
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Default)]
pub enum PlotMode {
    #[default]
    TimeDomain,
    Spectrum,
    Integral,
    DoubleIntegral,
}

impl PlotMode {
    pub const ALL: [PlotMode; 4] = [
        PlotMode::TimeDomain,
        PlotMode::Spectrum,
        PlotMode::Integral,
        PlotMode::DoubleIntegral,
    ];

    /// Label shown on the mode switch.
    pub fn label(self) -> &'static str {
        match self {
            PlotMode::TimeDomain => "default",
            PlotMode::Spectrum => "spectr",
            PlotMode::Integral => "int",
            PlotMode::DoubleIntegral => "dint",
        }
    }

    pub fn x_label(self) -> &'static str {
        match self {
            PlotMode::Spectrum => "Freq (Hz)",
            _ => "time (s)",
        }
    }

    pub fn y_label(self) -> &'static str {
        match self {
            PlotMode::Spectrum => "Ampl",
            _ => "",
        }
    }
}

// 整个会话的显示方式（由配置文件决定）
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum DisplayMode {
    Interactive,
    Filtered { low_hz: f64, high_hz: f64, order: usize },
    Histogram { bins: usize },
}
