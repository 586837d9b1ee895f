//! Scenario tests for folding platform documents together.

#[cfg(test)]
mod tests {
    use crate::ims::{Platform, Record};
    use crate::merge::{Finding, Report};
    use crate::xml::{parse_str, to_string};
    use pretty_assertions::assert_eq;

    fn parse(source: &str, report: &mut Report) -> Platform {
        Platform::parse(&parse_str(source).unwrap(), report).unwrap()
    }

    fn fold(sources: &[&str]) -> (Platform, Report) {
        let mut report = Report::new();
        let mut platform = Platform::new();
        for source in sources {
            let document = parse(source, &mut report);
            platform.merge(document, &mut report);
        }
        (platform, report)
    }

    fn app_with_m1(doc: &str, size: &str) -> String {
        format!(
            r#"<VirtualComponent Name="{doc}">
  <Equipment Name="E1">
    <DataExchange/>
    <Application Name="App1">
      <DataExchange>
        <AFDX>
          <ProducedData>
            <SamplingMessage Name="M1" LocalName="m1" MessageSizeBytes="{size}" ValidityDurationUs="1000"/>
          </ProducedData>
        </AFDX>
      </DataExchange>
    </Application>
  </Equipment>
</VirtualComponent>"#
        )
    }

    const FULL: &str = r#"<VirtualComponent Name="FULL">
  <DataExchange>
    <NAD><ConsumedData><Message Name="N1" LocalName="n1" MessageSizeBytes="16" MessageType="FLOAT"/></ConsumedData></NAD>
  </DataExchange>
  <Equipment Name="E1">
    <DataExchange>
      <AFDX>
        <ProducedData>
          <SamplingMessage Name="S1" LocalName="s1" MessageSizeBytes="32" ValidityDurationUs="1000" PeriodUs="100"/>
          <QueuingMessage Name="Q1" LocalName="q1" MaxSizeBytes="64" QueueDepth="8"/>
        </ProducedData>
      </AFDX>
      <A429>
        <ConsumedData>
          <Bus Name="B1">
            <SamplingLabel Number="203" Sdi="0" LocalName="ALT" ValidityDurationUs="200000"/>
            <QueuingLabel Number="204" Sdi="1" LocalName="MSG" QueueDepth="4"/>
          </Bus>
        </ConsumedData>
      </A429>
      <CAN>
        <ProducedData>
          <Bus Name="C1">
            <SamplingMessage Id="0x100" LocalName="frame" MessageSizeBytes="8" ValidityDurationUs="500"/>
          </Bus>
        </ProducedData>
      </CAN>
      <DISCRETE>
        <ProducedData><Signal Name="D1" LocalName="d1" TrueState="1" FalseState="0" HWPP="Y"/></ProducedData>
      </DISCRETE>
      <ANALOGUE>
        <ConsumedData><Signal Name="A1" LocalName="a1" ScaleFactor="0.5" Offset="10" PeriodUs="1000"/></ConsumedData>
      </ANALOGUE>
    </DataExchange>
    <Application Name="App1">
      <DataExchange/>
    </Application>
  </Equipment>
</VirtualComponent>"#;

    #[test]
    fn test_incompatible_redefinition_aborts() {
        let a = app_with_m1("A", "32");
        let b = app_with_m1("B", "64");
        let (platform, report) = fold(&[&a, &b]);

        assert_eq!(report.errors(), 1);
        assert_eq!(report.warnings(), 0);
        match report.iter().next().unwrap() {
            Finding::Incompatible { family, key, .. } => {
                assert_eq!(family, "AFDX");
                assert_eq!(key, "M1");
            }
            other => panic!("unexpected finding {:?}", other),
        }

        // The first definition is kept.
        let m1 = platform.equipments["E1"].applications["App1"]
            .data_exchange
            .as_ref()
            .unwrap()
            .afdx
            .produced
            .sampling
            .get("M1")
            .unwrap();
        assert_eq!(m1.message_size_bytes, "32");
    }

    #[test]
    fn test_compatible_redefinition_is_silent() {
        let a = app_with_m1("A", "32");
        let b = app_with_m1("B", "32");
        let (platform, report) = fold(&[&a, &b]);

        assert!(report.is_empty());
        assert_eq!(platform.name(), "A_B");
    }

    #[test]
    fn test_idempotent_merge() {
        let (mut platform, report) = fold(&[FULL]);
        assert!(report.is_empty());
        let before = platform.clone();

        let mut second = Report::new();
        let again = parse(FULL, &mut second);
        platform.merge(again, &mut second);

        assert!(second.is_empty());
        assert_eq!(platform.data_exchange, before.data_exchange);
        assert_eq!(platform.equipments, before.equipments);
    }

    #[test]
    fn test_novel_application_is_added() {
        let a = app_with_m1("A", "32");
        let b = r#"<VirtualComponent Name="B">
  <Equipment Name="E1">
    <Application Name="App2">
      <DataExchange>
        <DISCRETE><ConsumedData><Signal Name="D9" LocalName="d9"/></ConsumedData></DISCRETE>
      </DataExchange>
    </Application>
  </Equipment>
</VirtualComponent>"#;
        let (platform, report) = fold(&[&a, b]);

        assert!(report.is_empty());
        let apps: Vec<_> = platform.equipments["E1"].applications.keys().cloned().collect();
        assert_eq!(apps, vec!["App1".to_string(), "App2".to_string()]);
    }

    #[test]
    fn test_new_equipment_and_top_level_exchange() {
        let a = app_with_m1("A", "32");
        let b = r#"<VirtualComponent Name="B">
  <DataExchange>
    <AFDX><ConsumedData><QueuingMessage Name="Q" LocalName="q" MaxSizeBytes="4" QueueDepth="1"/></ConsumedData></AFDX>
  </DataExchange>
  <Equipment Name="E2"/>
</VirtualComponent>"#;
        let (platform, report) = fold(&[&a, b]);

        assert!(report.is_empty());
        assert!(platform.data_exchange.is_some());
        let names: Vec<_> = platform.equipments.keys().cloned().collect();
        assert_eq!(names, vec!["E1".to_string(), "E2".to_string()]);
    }

    #[test]
    fn test_undeclared_exchange_is_not_written() {
        let a = r#"<VirtualComponent Name="A">
  <Equipment Name="E2">
    <Application Name="App9"/>
  </Equipment>
</VirtualComponent>"#;
        let b = r#"<VirtualComponent Name="B">
  <Equipment Name="E2">
    <Application Name="App9"/>
  </Equipment>
  <Equipment Name="E3">
    <DataExchange/>
  </Equipment>
</VirtualComponent>"#;
        let (platform, report) = fold(&[a, b]);
        assert!(report.is_empty());

        let e2 = &platform.equipments["E2"];
        assert_eq!(e2.data_exchange, None);
        assert_eq!(e2.applications["App9"].data_exchange, None);

        let mut tree = platform.to_element();
        tree.indent();
        let expected = r#"<?xml version="1.0" encoding="utf-8"?>
<VirtualComponent Name="A_B">
  <Equipment Name="E2">
    <Application Name="App9"/>
  </Equipment>
  <Equipment Name="E3">
    <DataExchange/>
  </Equipment>
</VirtualComponent>
"#;
        assert_eq!(to_string(&tree).unwrap(), expected);
    }

    #[test]
    fn test_exchange_declared_later_is_adopted() {
        let a = r#"<VirtualComponent Name="A"><Equipment Name="E1"/></VirtualComponent>"#;
        let b = r#"<VirtualComponent Name="B"><Equipment Name="E1"><DataExchange>
  <NAD><ProducedData><Message Name="N" LocalName="x" MessageSizeBytes="4"/></ProducedData></NAD>
</DataExchange></Equipment></VirtualComponent>"#;
        let (platform, report) = fold(&[a, b]);

        assert!(report.is_empty());
        let exchange = platform.equipments["E1"].data_exchange.as_ref().unwrap();
        assert_eq!(exchange.nad.produced.get("N").unwrap().local_name, "x");
    }

    #[test]
    fn test_produced_and_consumed_do_not_conflict() {
        let a = r#"<VirtualComponent Name="A"><Equipment Name="E1"><DataExchange>
  <NAD><ProducedData><Message Name="N" LocalName="x" MessageSizeBytes="4"/></ProducedData></NAD>
</DataExchange></Equipment></VirtualComponent>"#;
        let b = r#"<VirtualComponent Name="B"><Equipment Name="E1"><DataExchange>
  <NAD><ConsumedData><Message Name="N" LocalName="y" MessageSizeBytes="8"/></ConsumedData></NAD>
</DataExchange></Equipment></VirtualComponent>"#;
        let (platform, report) = fold(&[a, b]);

        assert!(report.is_empty());
        let nad = &platform.equipments["E1"].data_exchange.as_ref().unwrap().nad;
        assert_eq!(nad.produced.get("N").unwrap().local_name, "x");
        assert_eq!(nad.consumed.get("N").unwrap().local_name, "y");
    }

    #[test]
    fn test_round_trip() {
        let (platform, report) = fold(&[FULL]);
        assert!(report.is_empty());

        let mut tree = platform.to_element();
        tree.indent();
        let rendered = to_string(&tree).unwrap();

        let mut second = Report::new();
        let reparsed = parse(&rendered, &mut second);
        assert!(second.is_empty());
        assert_eq!(reparsed, platform);
    }

    #[test]
    fn test_canonical_output() {
        let a = app_with_m1("A", "32");
        let (platform, _) = fold(&[&a, FULL]);

        let mut tree = platform.to_element();
        tree.indent();
        let rendered = to_string(&tree).unwrap();

        let expected = r#"<?xml version="1.0" encoding="utf-8"?>
<VirtualComponent Name="A_FULL">
  <DataExchange>
    <NAD>
      <ConsumedData>
        <Message Name="N1" LocalName="n1" MessageSizeBytes="16" MessageType="FLOAT"/>
      </ConsumedData>
    </NAD>
  </DataExchange>
  <Equipment Name="E1">
    <DataExchange>
      <AFDX>
        <ProducedData>
          <SamplingMessage Name="S1" LocalName="s1" MessageSizeBytes="32" ValidityDurationUs="1000" PeriodUs="100"/>
          <QueuingMessage Name="Q1" LocalName="q1" MaxSizeBytes="64" QueueDepth="8"/>
        </ProducedData>
      </AFDX>
      <A429>
        <ConsumedData>
          <Bus Name="B1">
            <SamplingLabel Number="203" Sdi="0" LocalName="ALT" ValidityDurationUs="200000"/>
            <QueuingLabel Number="204" Sdi="1" LocalName="MSG" QueueDepth="4"/>
          </Bus>
        </ConsumedData>
      </A429>
      <CAN>
        <ProducedData>
          <Bus Name="C1">
            <SamplingMessage Id="0x100" LocalName="frame" MessageSizeBytes="8" ValidityDurationUs="500"/>
          </Bus>
        </ProducedData>
      </CAN>
      <DISCRETE>
        <ProducedData>
          <Signal Name="D1" LocalName="d1" TrueState="1" FalseState="0" HWPP="Y"/>
        </ProducedData>
      </DISCRETE>
      <ANALOGUE>
        <ConsumedData>
          <Signal Name="A1" LocalName="a1" ScaleFactor="0.5" Offset="10" PeriodUs="1000"/>
        </ConsumedData>
      </ANALOGUE>
    </DataExchange>
    <Application Name="App1">
      <DataExchange>
        <AFDX>
          <ProducedData>
            <SamplingMessage Name="M1" LocalName="m1" MessageSizeBytes="32" ValidityDurationUs="1000"/>
          </ProducedData>
        </AFDX>
      </DataExchange>
    </Application>
  </Equipment>
</VirtualComponent>
"#;
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_keys_stay_unique() {
        let a = app_with_m1("A", "32");
        let b = app_with_m1("B", "64");
        let c = app_with_m1("C", "32");
        let (platform, report) = fold(&[&a, &b, &c]);

        assert_eq!(report.errors(), 1);
        let sampling = &platform.equipments["E1"].applications["App1"]
            .data_exchange
            .as_ref()
            .unwrap()
            .afdx
            .produced
            .sampling;
        assert_eq!(sampling.len(), 1);
        assert_eq!(sampling.iter().next().unwrap().key(), "M1");
    }
}
