pub mod cpu_chart;
