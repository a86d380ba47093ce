// ==========================================
// 清运运营报表分析引擎 - 导出格式化器
// ==========================================
// 职责: 汇总表 (表头 + 行) -> 分隔文本
// 红线: 含分隔符/引号/换行的字段按标准规则加引号并折叠转义;
//       行序 = 输入序, 不做隐式排序;
//       末行后恰好一个换行, 不多不少
// ==========================================

use crate::domain::types::RatioValue;
use crate::domain::GroupRollup;
use thiserror::Error;

// ==========================================
// 导出错误
// ==========================================
// 仅来自 csv 写缓冲接缝; 内存缓冲在实践中不会失败,
// 但按仓库惯例传播而不是就地 unwrap
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV 写入失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("导出缓冲回收失败: {0}")]
    Buffer(String),

    #[error("导出内容非法 UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

// ==========================================
// ExportFormatter - 导出格式化器
// ==========================================
pub struct ExportFormatter;

impl ExportFormatter {
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 表头 + 行 -> 分隔文本
    ///
    /// 人工录入的自由文本 (备注/名称) 可以合法包含逗号,
    /// 引号规则交给 csv 写入器 (必要时加引号, 内部引号成对折叠)
    pub fn to_delimited_text(
        &self,
        headers: &[String],
        rows: &[Vec<String>],
    ) -> Result<String, ExportError> {
        let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());

        writer.write_record(headers)?;
        for row in rows {
            writer.write_record(row)?;
        }

        let buffer = writer
            .into_inner()
            .map_err(|e| ExportError::Buffer(e.to_string()))?;
        Ok(String::from_utf8(buffer)?)
    }

    /// 汇总列表 -> (表头, 行), 供分隔文本导出
    ///
    /// # 参数
    /// - `key_header`: 分组键列标题
    /// - `count_header`: 记录数列标题
    /// - `measure_columns`: (度量名, 列标题) 按呈现顺序
    /// - `ratio_columns`: (比率名, 列标题) 按呈现顺序
    pub fn rollup_table(
        &self,
        key_header: &str,
        count_header: &str,
        measure_columns: &[(&str, &str)],
        ratio_columns: &[(&str, &str)],
        rollups: &[GroupRollup],
    ) -> (Vec<String>, Vec<Vec<String>>) {
        let mut headers = Vec::with_capacity(2 + measure_columns.len() + ratio_columns.len());
        headers.push(key_header.to_string());
        headers.push(count_header.to_string());
        for (_, header) in measure_columns {
            headers.push((*header).to_string());
        }
        for (_, header) in ratio_columns {
            headers.push((*header).to_string());
        }

        let rows = rollups
            .iter()
            .map(|rollup| {
                let mut row = Vec::with_capacity(headers.len());
                row.push(rollup.key.clone());
                row.push(rollup.count.to_string());
                for (measure, _) in measure_columns {
                    row.push(format_number(rollup.measure(measure)));
                }
                for (ratio, _) in ratio_columns {
                    row.push(match rollup.ratio(ratio) {
                        RatioValue::Value(v) => format_number(v),
                        RatioValue::Undefined => RatioValue::UNDEFINED_TEXT.to_string(),
                    });
                }
                row
            })
            .collect();

        (headers, rows)
    }

    /// 汇总列表直接导出为分隔文本
    pub fn rollup_csv(
        &self,
        key_header: &str,
        count_header: &str,
        measure_columns: &[(&str, &str)],
        ratio_columns: &[(&str, &str)],
        rollups: &[GroupRollup],
    ) -> Result<String, ExportError> {
        let (headers, rows) = self.rollup_table(
            key_header,
            count_header,
            measure_columns,
            ratio_columns,
            rollups,
        );
        self.to_delimited_text(&headers, &rows)
    }
}

impl Default for ExportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// 数值列格式: 整数值不带小数位, 其余保留两位
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_export_round_trip_scenario() {
        let formatter = ExportFormatter::new();
        let text = formatter
            .to_delimited_text(
                &strings(&["Name", "Weight"]),
                &[strings(&["Acme, Inc.", "10"]), strings(&["Beta", "20"])],
            )
            .unwrap();

        assert_eq!(text, "Name,Weight\n\"Acme, Inc.\",10\nBeta,20\n");
    }

    #[test]
    fn test_empty_rows_header_only() {
        let formatter = ExportFormatter::new();
        let text = formatter
            .to_delimited_text(&strings(&["Name", "Weight"]), &[])
            .unwrap();

        assert_eq!(text, "Name,Weight\n");
    }

    #[test]
    fn test_internal_quotes_doubled() {
        let formatter = ExportFormatter::new();
        let text = formatter
            .to_delimited_text(
                &strings(&["Note"]),
                &[strings(&["said \"ok\" twice"]), strings(&["line\nbreak"])],
            )
            .unwrap();

        assert_eq!(text, "Note\n\"said \"\"ok\"\" twice\"\n\"line\nbreak\"\n");
    }

    #[test]
    fn test_row_order_preserved() {
        let formatter = ExportFormatter::new();
        let text = formatter
            .to_delimited_text(
                &strings(&["K"]),
                &[strings(&["z"]), strings(&["a"]), strings(&["m"])],
            )
            .unwrap();

        assert_eq!(text, "K\nz\na\nm\n");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(10.5), "10.50");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(33.333333), "33.33");
    }

    #[test]
    fn test_rollup_table() {
        let formatter = ExportFormatter::new();

        let mut rollup = GroupRollup::new("R1");
        rollup.count = 4;
        rollup.measures.insert("weight".to_string(), 120.0);
        rollup
            .ratios
            .insert("weight_per_trip".to_string(), RatioValue::Value(30.0));

        let mut undefined = GroupRollup::new("R2");
        undefined.count = 0;
        undefined.measures.insert("weight".to_string(), 0.0);
        undefined
            .ratios
            .insert("weight_per_trip".to_string(), RatioValue::Undefined);

        let text = formatter
            .rollup_csv(
                "Route",
                "Trips",
                &[("weight", "Weight (kg)")],
                &[("weight_per_trip", "Kg/Trip")],
                &[rollup, undefined],
            )
            .unwrap();

        assert_eq!(
            text,
            "Route,Trips,Weight (kg),Kg/Trip\nR1,4,120,30\nR2,0,0,—\n"
        );
    }
}
