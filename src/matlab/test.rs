// Test MATLAB conversion
//
//  Copyright (C) 2014-2022 Ryan Specialty Group, LLC.
//
//  This file is part of mcd2m.
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.

use super::*;
use crate::xir::reader::parse_str;
use std::collections::BTreeSet;

type Sut<'e> = Converter<'e, Vec<u8>, DefaultTrace>;

lazy_static! {
    /// Small but complete worksheet exercising every class of rule.
    static ref WORKSHEET: Document = parse_str(
        r#"<?xml version="1.0" encoding="utf-8"?>
        <worksheet version="3.0.3"
                   xmlns="http://schemas.mathsoft.com/worksheet30"
                   xmlns:ml="http://schemas.mathsoft.com/math30">
          <pointReleaseData app="Mathcad Prime"/>
          <metadata><generator>Mathcad</generator></metadata>
          <settings>
            <presentation><textRendering/></presentation>
            <calculation><calculationBehavior optimize="false"/></calculation>
            <units/>
          </settings>
          <regions>
            <region region-id="1">
              <text><p style="Normal">Wire sizing</p></text>
            </region>
            <region region-id="2">
              <math>
                <ml:define>
                  <ml:id xml:space="preserve" subscript="max">I</ml:id>
                  <ml:apply>
                    <ml:mult/>
                    <ml:real>18</ml:real>
                    <ml:id xml:space="preserve">mA</ml:id>
                  </ml:apply>
                </ml:define>
              </math>
            </region>
            <region region-id="3">
              <math>
                <ml:eval>
                  <ml:apply>
                    <ml:div/>
                    <ml:id xml:space="preserve" subscript="max">I</ml:id>
                    <ml:real>2</ml:real>
                  </ml:apply>
                  <result><ml:real>0.009</ml:real></result>
                </ml:eval>
              </math>
            </region>
            <region region-id="4"><plot item-idref="297"/></region>
          </regions>
          <binaryContent><item item-id="297">AAAA</item></binaryContent>
        </worksheet>"#
    )
    .expect("invalid worksheet fixture");
}

/// Convert the root element of `xml`.
fn convert_root(xml: &str) -> (String, IdentTracker) {
    let doc = parse_str(xml).expect("invalid XML in test case");
    let root = doc.root_element().expect("missing root element");

    let mut out = Emitter::buffer();
    let mut idents = IdentTracker::new();

    Sut::new(&mut out, &mut idents).convert_element(root);

    (out.as_str().to_owned(), idents)
}

/// Convert an entire document.
fn convert_doc(doc: &Document) -> (String, IdentTracker) {
    let mut out = Emitter::buffer();
    let mut idents = IdentTracker::new();

    Sut::new(&mut out, &mut idents).convert_document(doc);

    (out.as_str().to_owned(), idents)
}

fn assert_converts(xml: &str, expected: &str) {
    assert_eq!(expected, convert_root(xml).0, "converting {xml}");
}

fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().copied().map(String::from).collect()
}

mod leaf {
    use super::*;

    #[test]
    fn id() {
        assert_converts("<ml:id>hello</ml:id>", "hello");
    }

    #[test]
    fn id_with_subscript() {
        assert_converts(
            r#"<ml:id xml:space="preserve" subscript="rol">α</ml:id>"#,
            "α_rol",
        );
    }

    #[test]
    fn real() {
        assert_converts("<ml:real>0.7</ml:real>", "0.7");
    }

    #[test]
    fn imag_j() {
        assert_converts(r#"<ml:imag symbol="j">1</ml:imag>"#, "1j");
    }

    #[test]
    fn imag_i() {
        assert_converts(r#"<ml:imag symbol="i">3</ml:imag>"#, "3i");
    }

    #[test]
    fn imag_without_symbol() {
        assert_converts("<ml:imag>3</ml:imag>", "3");
    }

    #[test]
    fn p_comment() {
        assert_converts("<p>some words</p>", "% some words");
    }

    #[test]
    fn p_comment_uses_leading_text_only() {
        assert_converts(
            r#"<p style="Normal">hello <b>Yellow highlights</b> there</p>"#,
            "% hello ",
        );
    }

    #[test]
    fn text_node_converts_to_nothing() {
        let mut out = Emitter::buffer();
        let mut idents = IdentTracker::new();

        Sut::new(&mut out, &mut idents).convert(&Node::from("stray text"));

        assert_eq!("", out.as_str());
    }
}

mod structural {
    use super::*;

    #[test]
    fn parens_empty() {
        assert_converts("<ml:parens/>", "()");
    }

    #[test]
    fn parens_with_content() {
        assert_converts("<ml:parens><ml:id>hello</ml:id></ml:parens>", "(hello)");
    }

    #[test]
    fn text_and_p_comment() {
        assert_converts(
            r#"<text use-page-width="false" push-down="false" lock-width="true">
                 <p style="Normal" margin-left="inherit">some words</p>
               </text>"#,
            "% some words\n",
        );
    }

    #[test]
    fn math_terminates_statement() {
        assert_converts("<math><ml:real>1</ml:real></math>", "1;\n");
    }

    #[test]
    fn empty_math_is_bare_terminator() {
        assert_converts("<math/>", ";\n");
    }

    #[test]
    fn define() {
        let (out, idents) = convert_root(
            r#"<ml:define xmlns:ml="http://schemas.mathsoft.com/math30">
                 <ml:id xml:space="preserve">ID</ml:id>
                 <ml:apply>
                   <ml:mult/>
                   <ml:real>18</ml:real>
                   <ml:id xml:space="preserve">mA</ml:id>
                 </ml:apply>
               </ml:define>"#,
        );

        assert_eq!("ID = (18 * mA)", out);
        assert_eq!(&set(&["ID"]), idents.defined());
        assert_eq!(set(&["mA"]), idents.snapshot_undefined());
    }

    #[test]
    fn math_define_eval_result() {
        let (out, idents) = convert_root(
            r#"<math>
                 <ml:define>
                   <ml:id xml:space="preserve" subscript="r">T</ml:id>
                   <ml:eval placeholderMultiplicationStyle="default">
                     <ml:apply>
                       <ml:mult style="auto-select"/>
                       <ml:real>3</ml:real>
                       <ml:id xml:space="preserve">°</ml:id>
                     </ml:apply>
                     <result xmlns="http://schemas.mathsoft.com/math30">
                       <ml:real>0.5</ml:real>
                     </result>
                   </ml:eval>
                 </ml:define>
               </math>"#,
        );

        assert_eq!("T_r = (3 * °); % expected result: 0.5;\n", out);
        assert!(idents.is_defined("T_r"));
        assert_eq!(set(&["°"]), idents.snapshot_undefined());
    }

    #[test]
    fn define_function_with_bound_vars() {
        let (out, idents) = convert_root(
            r#"<ml:define xmlns:ml="http://schemas.mathsoft.com/math30">
                 <ml:function>
                   <ml:id xml:space="preserve">HVdc</ml:id>
                   <ml:boundVars>
                     <ml:id xml:space="preserve">z</ml:id>
                   </ml:boundVars>
                 </ml:function>
                 <ml:apply>
                   <ml:mult/>
                   <ml:id xml:space="preserve">z</ml:id>
                   <ml:real>2</ml:real>
                 </ml:apply>
               </ml:define>"#,
        );

        assert_eq!("HVdc = @(z) (z * 2)", out);

        // Only plain identifiers are registered as definitions.
        assert!(idents.defined().is_empty());
        assert_eq!(set(&["HVdc", "z"]), idents.snapshot_undefined());
    }

    #[test]
    fn bound_vars_multiple() {
        assert_converts(
            "<ml:boundVars><ml:id>x</ml:id><ml:id>y</ml:id></ml:boundVars>",
            " = @(x, y) ",
        );
    }

    #[test]
    fn define_without_children() {
        let (out, idents) = convert_root("<ml:define/>");

        assert_eq!(" = ", out);
        assert!(idents.defined().is_empty());
    }

    #[test]
    fn unit_reference() {
        assert_converts(r#"<unitReference unit="radian"/>"#, "radian");
    }

    #[test]
    fn unit_reference_with_power_numerator() {
        assert_converts(
            r#"<unitReference unit="second" power-numerator="-2"/>"#,
            "second^-2",
        );
    }

    #[test]
    fn united_value_and_monomial_multiply() {
        assert_converts(
            r#"<unitedValue>
                 <ml:real>3</ml:real>
                 <unitMonomial>
                   <unitReference unit="meter"/>
                   <unitReference unit="second" power-numerator="-2"/>
                 </unitMonomial>
               </unitedValue>"#,
            "3 * meter * second^-2",
        );
    }

    #[test]
    fn sequence() {
        assert_converts(
            "<ml:sequence><ml:real>1</ml:real><ml:id>a</ml:id>\
                <ml:real>2</ml:real></ml:sequence>",
            "1, a, 2",
        );
    }

    #[test]
    fn unit_override() {
        assert_converts(
            r#"<ml:unitOverride>
                 <ml:apply>
                   <ml:mult/>
                   <ml:id xml:space="preserve">gm</ml:id>
                   <ml:apply>
                     <ml:pow/>
                     <ml:id xml:space="preserve">cm</ml:id>
                     <ml:real>2</ml:real>
                   </ml:apply>
                 </ml:apply>
               </ml:unitOverride>"#,
            "; % (gm * (cm^2))",
        );
    }

    #[test]
    fn range() {
        assert_converts(
            r#"<ml:range>
                 <ml:real>0</ml:real>
                 <ml:id xml:space="preserve">nmax</ml:id>
               </ml:range>"#,
            "((0:nmax) + ARRAY_OFFSET)",
        );
    }

    #[test]
    fn plot() {
        assert_converts(
            r#"<plot disable-calc="false" item-idref="297"/>"#,
            "% a mathcad plot was here but there is no good way to know \
                what was in it\n",
        );
    }
}

mod dispatch {
    use super::*;

    #[test]
    fn document_worksheet_regions_region() {
        let doc = parse_str(
            r#"<?xml version="1.0"?>
            <worksheet version="3.0.3"
                       xmlns="http://schemas.mathsoft.com/worksheet30"
                       xmlns:ml="http://schemas.mathsoft.com/math30">
              <regions>
                <region><ml:id>hello</ml:id></region>
                <region><text><p>some words</p></text></region>
                <region><ml:real>0.7</ml:real></region>
              </regions>
            </worksheet>"#,
        )
        .unwrap();

        assert_eq!("hello% some words\n0.7", convert_doc(&doc).0);
    }

    #[test]
    fn skipped_tags_emit_nothing() {
        assert_converts(
            r#"<worksheet>
                 <metadata><generator>x</generator></metadata>
                 <settings>
                   <calculationBehavior optimize="false"/>
                   <editor/><fileFormat/><miscellaneous/><textStyle/>
                   <rendering/>
                 </settings>
                 <originRef/><parentRef/><comment>c</comment>
                 <originComment/><contentHash>abc</contentHash>
               </worksheet>"#,
            "",
        );
    }

    #[test]
    fn provenance_is_traversed() {
        assert_converts(
            "<ml:provenance><originRef/><ml:real>2</ml:real></ml:provenance>",
            "2",
        );
    }

    #[test]
    fn unknown_tag_is_annotated_and_traversed() {
        assert_converts(
            "<region><wrapper><ml:real>1</ml:real></wrapper></region>",
            "'wrapper' function not found\n1",
        );
    }

    #[test]
    fn unknown_root_tag() {
        assert_converts("<dunno/>", "'dunno' function not found\n");
    }

    #[test]
    fn element_named_document_is_traversed() {
        assert_converts("<document><ml:real>4</ml:real></document>", "4");
    }

    #[test]
    fn full_worksheet() {
        let (out, idents) = convert_doc(&WORKSHEET);

        assert_eq!(
            "% Wire sizing\n\
             I_max = (18 * mA);\n\
             (I_max / 2); % expected result: 0.009;\n\
             % a mathcad plot was here but there is no good way to know \
                what was in it\n",
            out
        );

        assert_eq!(&set(&["I_max"]), idents.defined());
        assert_eq!(set(&["mA"]), idents.snapshot_undefined());
    }
}

mod apply {
    use super::*;

    /// `0.039 OP V_t`.
    fn op_test(op_tag: &str, op_str: &str) {
        let xml = format!(
            r#"<ml:apply>
                 <{op_tag}/>
                 <ml:real>0.039</ml:real>
                 <ml:id xml:space="preserve" subscript="t">V</ml:id>
               </ml:apply>"#
        );

        assert_converts(&xml, &format!("(0.039 {op_str} V_t)"));
    }

    #[test]
    fn plus() {
        op_test("ml:plus", "+");
    }

    #[test]
    fn minus() {
        op_test("ml:minus", "-");
    }

    #[test]
    fn mult() {
        op_test("ml:mult", "*");
    }

    #[test]
    fn div() {
        op_test("ml:div", "/");
    }

    #[test]
    fn equal() {
        op_test("ml:equal", "==");
    }

    #[test]
    fn greater_than() {
        op_test("ml:greaterThan", ">");
    }

    #[test]
    fn less_than() {
        op_test("ml:lessThan", "<");
    }

    #[test]
    fn pow_has_no_spaces() {
        assert_converts(
            r#"<ml:apply>
                 <ml:pow/>
                 <ml:real>0.039</ml:real>
                 <ml:id xml:space="preserve" subscript="t">V</ml:id>
               </ml:apply>"#,
            "(0.039^V_t)",
        );
    }

    #[test]
    fn operands_are_recorded() {
        let (_, idents) = convert_root(
            r#"<ml:apply>
                 <ml:plus/>
                 <ml:real>0.039</ml:real>
                 <ml:id subscript="t">V</ml:id>
               </ml:apply>"#,
        );

        assert_eq!(set(&["V_t"]), idents.snapshot_undefined());
    }

    #[test]
    fn nested() {
        assert_converts(
            "<ml:apply><ml:plus/>\
                <ml:apply><ml:mult/><ml:real>2</ml:real><ml:id>x</ml:id></ml:apply>\
                <ml:apply><ml:neg/><ml:id>y</ml:id></ml:apply>\
             </ml:apply>",
            "((2 * x) + (-y))",
        );
    }

    #[test]
    fn neg() {
        assert_converts(
            "<ml:apply><ml:neg/><ml:id>hello</ml:id></ml:apply>",
            "(-hello)",
        );
    }

    #[test]
    fn abs() {
        assert_converts(
            "<ml:apply><ml:absval/><ml:real>-1</ml:real></ml:apply>",
            "abs(-1)",
        );
    }

    #[test]
    fn sqrt() {
        assert_converts(
            "<ml:apply><ml:sqrt/><ml:id>x</ml:id></ml:apply>",
            "sqrt(x)",
        );
    }

    #[test]
    fn find() {
        assert_converts(
            "<ml:apply><ml:Find/><ml:id>x</ml:id></ml:apply>",
            "Find(x)",
        );
    }

    #[test]
    fn indexer() {
        assert_converts(
            r#"<ml:apply>
                 <ml:indexer/>
                 <ml:id xml:space="preserve">w</ml:id>
                 <ml:id xml:space="preserve">n</ml:id>
               </ml:apply>"#,
            "w(n)",
        );
    }

    #[test]
    fn tan() {
        let (out, idents) = convert_root(
            r#"<ml:apply>
                 <ml:id xml:space="preserve">tan</ml:id>
                 <ml:id xml:space="preserve" subscript="b">a</ml:id>
               </ml:apply>"#,
        );

        assert_eq!("tan(a_b)", out);

        // The callee is an identifier like any other.
        assert_eq!(set(&["a_b", "tan"]), idents.snapshot_undefined());
    }

    #[test]
    fn id_four_args() {
        assert_converts(
            "<ml:apply>
               <ml:id>some_fun</ml:id>
               <ml:id>hello</ml:id>
               <ml:real>1</ml:real>
               <ml:id>there</ml:id>
               <ml:real>2</ml:real>
             </ml:apply>",
            "some_fun(hello, 1, there, 2)",
        );
    }

    #[test]
    fn id_no_args() {
        assert_converts("<ml:apply><ml:id>rand</ml:id></ml:apply>", "rand()");
    }

    #[test]
    fn if_is_renamed() {
        let (out, idents) = convert_root(
            r#"<math optimize="false" disable-calc="false">
                 <ml:define xmlns:ml="http://schemas.mathsoft.com/math30">
                   <ml:id xml:space="preserve">VdspMax</ml:id>
                   <ml:apply>
                     <ml:id xml:space="preserve">if</ml:id>
                     <ml:sequence>
                       <ml:apply>
                         <ml:greaterThan/>
                         <ml:real>3.3</ml:real>
                         <ml:real>2</ml:real>
                       </ml:apply>
                       <ml:real>3.3</ml:real>
                       <ml:real>2</ml:real>
                     </ml:sequence>
                   </ml:apply>
                 </ml:define>
               </math>"#,
        );

        assert_eq!("VdspMax = if_((3.3 > 2), 3.3, 2);\n", out);

        // Renamed callee is not an identifier reference.
        assert!(idents.snapshot_undefined().is_empty());
    }

    #[test]
    fn if_with_subscript_is_still_renamed() {
        assert_converts(
            r#"<ml:apply>
                 <ml:id subscript="x">if</ml:id>
                 <ml:real>1</ml:real>
               </ml:apply>"#,
            "if_(1)",
        );
    }

    #[test]
    fn dunno_no_args() {
        assert_converts(
            "<ml:apply><ml:dunno/></ml:apply>",
            "'apply' contains <ml:dunno> and no other tags\n",
        );
    }

    #[test]
    fn known_operator_no_args() {
        assert_converts(
            "<ml:apply><ml:plus/></ml:apply>",
            "'apply' contains <ml:plus> and no other tags\n",
        );
    }

    #[test]
    fn empty_apply() {
        assert_converts("<ml:apply/>", "'apply' contains <> and no other tags\n");
    }

    #[test]
    fn dunno_one_arg() {
        assert_converts(
            "<ml:apply><ml:dunno/><ml:id>hello</ml:id></ml:apply>",
            "'apply' contains <ml:dunno> with one argument <ml:id>\n",
        );
    }

    #[test]
    fn binary_operator_with_one_arg() {
        assert_converts(
            "<ml:apply><ml:plus/><ml:id>hello</ml:id></ml:apply>",
            "'apply' contains <ml:plus> with one argument <ml:id>\n",
        );
    }

    #[test]
    fn dunno_two_args() {
        assert_converts(
            "<ml:apply><ml:dunno/><ml:id>hello</ml:id>\
                <ml:id>hello</ml:id></ml:apply>",
            "'apply' contains <ml:dunno> with two arguments <ml:id>, <ml:id>\n",
        );
    }

    #[test]
    fn unary_operator_with_two_args() {
        assert_converts(
            "<ml:apply><ml:neg/><ml:id>a</ml:id><ml:real>1</ml:real></ml:apply>",
            "'apply' contains <ml:neg> with two arguments <ml:id>, <ml:real>\n",
        );
    }

    #[test]
    fn dunno_three_args() {
        assert_converts(
            "<ml:apply><ml:dunno/><ml:id>hello</ml:id><ml:id>hello</ml:id>\
                <ml:real>0.039</ml:real></ml:apply>",
            "'apply' contains <ml:dunno> with three (or more) arguments \
                <ml:id>, <ml:id>, <ml:real>\n",
        );
    }

    #[test]
    fn plus_four_args_names_all() {
        assert_converts(
            "<ml:apply><ml:plus/><ml:real>1</ml:real><ml:real>2</ml:real>\
                <ml:real>3</ml:real><ml:id>x</ml:id></ml:apply>",
            "'apply' contains <ml:plus> with three (or more) arguments \
                <ml:real>, <ml:real>, <ml:real>, <ml:id>\n",
        );
    }

    #[test]
    fn diagnostics_do_not_convert_operands() {
        let (_, idents) = convert_root(
            "<ml:apply><ml:dunno/><ml:id>a</ml:id><ml:id>b</ml:id></ml:apply>",
        );

        assert!(idents.snapshot_undefined().is_empty());
    }

    #[test]
    fn malformed_apply_does_not_stop_conversion() {
        assert_converts(
            "<regions>\
               <region><math><ml:apply><ml:dunno/></ml:apply></math></region>\
               <region><math><ml:real>1</ml:real></math></region>\
             </regions>",
            "'apply' contains <ml:dunno> and no other tags\n;\n1;\n",
        );
    }
}

mod idents {
    use super::*;

    #[test]
    fn used_before_defined_is_undefined() {
        let doc = parse_str(
            "<regions>\
               <region><math><ml:eval><ml:id>a</ml:id></ml:eval></math></region>\
               <region><math><ml:define><ml:id>a</ml:id>\
                 <ml:real>1</ml:real></ml:define></math></region>\
               <region><math><ml:eval><ml:id>a</ml:id></ml:eval></math></region>\
             </regions>",
        )
        .unwrap();

        let (out, idents) = convert_doc(&doc);

        assert_eq!("a;\na = 1;\na;\n", out);
        assert!(idents.is_defined("a"));
        assert_eq!(set(&["a"]), idents.snapshot_undefined());
    }

    #[test]
    fn self_reference_in_definition_is_defined() {
        let (out, idents) = convert_root(
            "<ml:define><ml:id>x</ml:id>\
               <ml:apply><ml:plus/><ml:id>x</ml:id><ml:real>1</ml:real></ml:apply>\
             </ml:define>",
        );

        assert_eq!("x = (x + 1)", out);

        // The definition is registered before the right-hand side is
        //   converted.
        assert!(idents.snapshot_undefined().is_empty());
    }

    #[test]
    fn each_conversion_starts_empty() {
        let (_, first) = convert_root("<ml:id>a</ml:id>");
        let (_, second) = convert_root("<ml:id>b</ml:id>");

        assert_eq!(set(&["a"]), first.snapshot_undefined());
        assert_eq!(set(&["b"]), second.snapshot_undefined());
    }

    #[test]
    fn top_level_convert_uses_fresh_state() {
        let mut out = Emitter::buffer();
        let mut idents = IdentTracker::new();

        convert(&WORKSHEET, &mut out, &mut idents);

        assert!(out.as_str().starts_with("% Wire sizing\n"));
        assert_eq!(set(&["mA"]), idents.snapshot_undefined());
    }
}
