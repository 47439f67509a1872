/// A plain document with a repeated element.
pub const CATALOG: &str = r#"<?xml version="1.0"?>
<catalog>
   <book id="bk101">
      <author>Gambardella, Matthew</author>
      <title>XML Developer's Guide</title>
      <genre>Computer</genre>
      <price>44.95</price>
      <publish_date>2000-10-01</publish_date>
   </book>
   <book id="bk102">
      <author>Ralls, Kim</author>
      <title>Midnight Rain</title>
      <genre>Fantasy</genre>
      <price>5</price>
      <publish_date>2000-12-16</publish_date>
   </book>
</catalog>
"#;

/// Prefixed namespaces only, with namespaced attributes on the document element.
pub const AIXM_MESSAGE: &str = r#"<?xml version="1.0"?>
<message:AIXMBasicMessage xmlns:message="http://www.aixm.aero/schema/5.1.1/message"
    xmlns:gml="http://www.opengis.net/gml/3.2"
    xmlns:aixm="http://www.aixm.aero/schema/5.1.1"
    xmlns:xlink="http://www.w3.org/1999/xlink"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    xsi:schemaLocation="http://www.aixm.aero/schema/5.1.1/message AIXM_BasicMessage.xsd"
    gml:id="M0000001">
    <gml:boundedBy>
        <gml:Envelope srsName="urn:ogc:def:crs:EPSG::4326">
            <gml:lowerCorner>-32.0886111111111 -47.0</gml:lowerCorner>
            <gml:upperCorner>57.690815969999996 52.4283333333333</gml:upperCorner>
        </gml:Envelope>
    </gml:boundedBy>
</message:AIXMBasicMessage>
"#;

/// A default namespace plus one prefixed extension namespace.
pub const FLIGHT_LEG: &str = r#"<?xml version="1.0"?>
<IATA_AIDX_FlightLegNotifRQ xmlns="http://www.iata.org/IATA/2007/00" xmlns:ba="http://baplc.com/extensionSchema" Version="15.1" SequenceNmbr="2084">
    <Originator CompanyShortName="BA"/>
    <FlightLeg>
        <LegIdentifier>
            <Airline CodeContext="3">BA</Airline>
            <FlightNumber>8277</FlightNumber>
            <OriginDate>2015-06-03</OriginDate>
        </LegIdentifier>
        <LegData>
            <OperationalStatus RepeatIndex="1" CodeContext="9750">OFB</OperationalStatus>
            <OperationalStatus RepeatIndex="2" CodeContext="9750">ONB</OperationalStatus>
            <ServiceType>J</ServiceType>
        </LegData>
        <TPA_Extension>
            <ba:FlightCrewAirline CodeContext="3">BA</ba:FlightCrewAirline>
        </TPA_Extension>
    </FlightLeg>
</IATA_AIDX_FlightLegNotifRQ>
"#;

pub const IATA_NAMESPACE: &str = "http://www.iata.org/IATA/2007/00";
pub const BA_NAMESPACE: &str = "http://baplc.com/extensionSchema";
